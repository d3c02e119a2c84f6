//! Application state.

use std::sync::Arc;
use tracker_news::NewsAggregator;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<NewsAggregator>,
}

impl AppState {
    pub fn new(aggregator: Arc<NewsAggregator>) -> Self {
        Self { aggregator }
    }
}
