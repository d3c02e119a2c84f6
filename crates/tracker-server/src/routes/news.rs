//! Crypto news route handlers.
//!
//! Both methods answer 200 with an `AggregatedResult`, degraded or not. A 500
//! is reserved for requests the handler cannot turn into a normal payload.

use axum::{
    Json,
    body::Bytes,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracker_news::NewsRequest;

use crate::state::AppState;

/// Body of a 500 response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

pub async fn get_crypto_news(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Response {
    let request = request_from_form(query.unwrap_or_default().as_bytes());
    info!("GET request with coin: {}", request.coin);
    respond(&state, request.coin).await
}

pub async fn post_crypto_news(State(state): State<AppState>, body: Bytes) -> Response {
    match request_from_body(&body) {
        Ok(request) => {
            info!("POST request with coin: {}", request.coin);
            respond(&state, request.coin).await
        }
        Err(message) => {
            error!("Unusable POST body: {message}");
            internal_error(message)
        }
    }
}

/// Read `coin` from url-encoded pairs. A repeated key keeps its last value.
fn request_from_form(input: &[u8]) -> NewsRequest {
    url::form_urlencoded::parse(input)
        .filter(|(key, _)| key == "coin")
        .last()
        .map_or_else(NewsRequest::default, |(_, value)| NewsRequest::new(value))
}

/// Read `coin` from a JSON object, falling back to form encoding when the
/// body is not JSON at all.
fn request_from_body(body: &[u8]) -> Result<NewsRequest, String> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(match map.get("coin") {
            None | Some(Value::Null) => NewsRequest::default(),
            Some(Value::String(coin)) => NewsRequest::new(coin.as_str()),
            Some(other) => NewsRequest::new(other.to_string()),
        }),
        Ok(other) => Err(format!("expected a JSON object, got {other}")),
        Err(_) => {
            let request = request_from_form(body);
            warn!("JSON decode failed, using form data. Coin: {}", request.coin);
            Ok(request)
        }
    }
}

async fn respond(state: &AppState, coin: String) -> Response {
    let aggregator = Arc::clone(&state.aggregator);
    let outcome = AssertUnwindSafe(async move { aggregator.fetch_news_and_sentiment(&coin).await })
        .catch_unwind()
        .await;

    let result = match outcome {
        Ok(result) => result,
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            error!("Error in crypto news handler: {message}");
            return internal_error(message);
        }
    };

    match serde_json::to_value(&result) {
        Ok(body) => {
            info!("Response data generated successfully");
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!("Error serializing crypto news response: {e}");
            internal_error(e.to_string())
        }
    }
}

fn internal_error(message: String) -> Response {
    let body = ErrorBody {
        error: "Internal server error".to_string(),
        message,
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin_from_body(body: &[u8]) -> Result<String, String> {
        request_from_body(body).map(|request| request.coin)
    }

    fn coin_from_query(query: &str) -> String {
        request_from_form(query.as_bytes()).coin
    }

    #[test]
    fn test_coin_from_json() {
        assert_eq!(coin_from_body(br#"{"coin":"ethereum"}"#).unwrap(), "ethereum");
        assert_eq!(coin_from_body(b"{}").unwrap(), "bitcoin");
        assert_eq!(coin_from_body(br#"{"coin":null}"#).unwrap(), "bitcoin");
        assert_eq!(coin_from_body(br#"{"coin":42}"#).unwrap(), "42");
    }

    #[test]
    fn test_coin_from_form() {
        assert_eq!(coin_from_body(b"coin=solana&x=1").unwrap(), "solana");
        assert_eq!(coin_from_body(b"coin=shiba+inu").unwrap(), "shiba inu");
        assert_eq!(coin_from_body(b"coin=a&coin=dogecoin").unwrap(), "dogecoin");
        assert_eq!(coin_from_body(b"").unwrap(), "bitcoin");
    }

    #[test]
    fn test_coin_from_query() {
        assert_eq!(coin_from_query("coin=ethereum"), "ethereum");
        assert_eq!(coin_from_query("coin=bitcoin&coin=ethereum"), "ethereum");
        assert_eq!(coin_from_query("coin=%ZZ&other"), "%ZZ");
        assert_eq!(coin_from_query("coin"), "");
        assert_eq!(coin_from_query("other=1"), "bitcoin");
        assert_eq!(coin_from_query(""), "bitcoin");
    }

    #[test]
    fn test_non_object_json_rejected() {
        assert!(coin_from_body(br#"["ethereum"]"#).is_err());
        assert!(coin_from_body(b"\"ethereum\"").is_err());
    }

    #[test]
    fn test_panic_message() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");

        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(panic_message(boxed.as_ref()), "owned boom");

        let boxed: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
