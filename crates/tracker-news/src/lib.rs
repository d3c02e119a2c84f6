//! Crypto news aggregation
//!
//! This crate turns a coin name into a short news digest with a sentiment
//! label. One request runs a fixed pipeline:
//!
//! 1. A deep-search call restricted to an allow-list of crypto news sites
//! 2. A language-model summary of the returned article text
//! 3. A language-model sentiment label (Bullish, Bearish or Neutral)
//!
//! Every failure along the way is folded into a degraded [`AggregatedResult`]
//! instead of being returned as an error.
//!
//! # Example
//!
//! ```rust,ignore
//! use tracker_news::NewsAggregator;
//! use tracker_utils::TrackerConfig;
//!
//! #[tokio::main]
//! async fn main() -> tracker_news::Result<()> {
//!     let aggregator = NewsAggregator::from_config(&TrackerConfig::from_env())?;
//!     let result = aggregator.fetch_news_and_sentiment("ethereum").await;
//!     println!("{} ({})", result.content, result.sentiment);
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod api;
pub mod error;
pub mod prompts;
pub mod result;
pub mod sentiment;
pub mod summary;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::NewsAggregator;
pub use api::{DeepSearchClient, DeepSearchRequest, SearchProvider};
pub use error::{NewsError, Result};
pub use result::{AggregatedResult, NewsRequest, SearchResult};
pub use sentiment::{Sentiment, SentimentClassifier};
pub use summary::Summarizer;
