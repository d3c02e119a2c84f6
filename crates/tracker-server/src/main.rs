//! trendtracker server binary
//!
//! ```bash
//! export API_KEY="jina_..."          # search API
//! export MISTRAL_API_KEY="..."       # language model
//! cargo run --bin trendtracker -- --port 8000
//! ```

use clap::Parser;
use std::time::Duration;
use tracing::{info, warn};
use tracker_utils::TrackerConfig;

#[derive(Parser, Debug)]
#[command(name = "trendtracker")]
#[command(about = "Crypto news digests with market sentiment", long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, env = "TRACKER_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "TRACKER_PORT")]
    port: Option<u16>,

    /// Search API timeout in seconds (fractions allowed)
    #[arg(long, env = "TRACKER_SEARCH_TIMEOUT")]
    search_timeout: Option<f64>,

    /// Language-model timeout in seconds (fractions allowed)
    #[arg(long, env = "TRACKER_LLM_TIMEOUT")]
    llm_timeout: Option<f64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info,tracker_news=info,tracker_server=info")]
    log_filter: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracker_utils::init_tracing_with_filter(&args.log_filter);

    let mut builder = TrackerConfig::builder().from_env();
    if let Some(host) = args.host {
        builder = builder.host(host);
    }
    if let Some(port) = args.port {
        builder = builder.port(port);
    }
    if let Some(secs) = args.search_timeout {
        builder = builder.search_timeout(Duration::try_from_secs_f64(secs)?);
    }
    if let Some(secs) = args.llm_timeout {
        builder = builder.llm_timeout(Duration::try_from_secs_f64(secs)?);
    }
    let config = builder.build()?;

    info!("Starting trendtracker");
    info!("  Search API: {}", config.search_api_base);
    info!("  LLM API: {} ({})", config.llm_api_base, config.llm_model);
    if !config.has_credentials() {
        warn!("API keys missing; /api/crypto-news/ will return degraded responses");
    }

    tracker_server::run_server(config).await
}
