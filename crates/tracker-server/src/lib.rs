//! trendtracker HTTP server
//!
//! Axum-based server exposing the crypto news endpoint.

pub mod routes;
pub mod state;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracker_news::NewsAggregator;
use tracker_utils::TrackerConfig;

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/crypto-news/",
            get(routes::news::get_crypto_news).post(routes::news::post_crypto_news),
        )
        .route(
            "/crypto-news",
            get(routes::news::get_crypto_news).post(routes::news::post_crypto_news),
        );

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until Ctrl-C.
pub async fn run_server(config: TrackerConfig) -> anyhow::Result<()> {
    let aggregator = NewsAggregator::from_config(&config)?;
    let app = create_router(AppState::new(Arc::new(aggregator)));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    tracing::info!("Web server stopped");
    Ok(())
}
