//! Request and result types for the news pipeline

use crate::error::NewsError;
use crate::prompts::DEFAULT_COIN;
use crate::sentiment::Sentiment;
use serde::{Deserialize, Serialize};

/// Most source URLs ever returned to a caller
pub const MAX_URLS: usize = 10;

/// Incoming request for a coin's news
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRequest {
    #[serde(default = "default_coin")]
    pub coin: String,
}

fn default_coin() -> String {
    DEFAULT_COIN.to_string()
}

impl NewsRequest {
    pub fn new(coin: impl Into<String>) -> Self {
        Self { coin: coin.into() }
    }
}

impl Default for NewsRequest {
    fn default() -> Self {
        Self::new(DEFAULT_COIN)
    }
}

/// Article text and sources returned by the search API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub raw_content: String,
    pub visited_urls: Vec<String>,
}

impl SearchResult {
    /// Build a result, keeping only the first [`MAX_URLS`] URLs
    pub fn new(raw_content: impl Into<String>, visited_urls: impl IntoIterator<Item = String>) -> Self {
        Self {
            raw_content: raw_content.into(),
            visited_urls: visited_urls.into_iter().take(MAX_URLS).collect(),
        }
    }
}

/// Payload handed back to the HTTP caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedResult {
    pub content: String,
    pub urls: Vec<String>,
    pub sentiment: Sentiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AggregatedResult {
    pub fn success(content: impl Into<String>, mut urls: Vec<String>, sentiment: Sentiment) -> Self {
        urls.truncate(MAX_URLS);
        Self {
            content: content.into(),
            urls,
            sentiment,
            error: None,
            message: None,
        }
    }

    /// Degraded result: placeholder content, no URLs, Neutral sentiment
    pub fn degraded(err: &NewsError) -> Self {
        Self {
            content: err.placeholder().to_string(),
            urls: Vec::new(),
            sentiment: Sentiment::Neutral,
            error: Some(err.to_string()),
            message: None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}
