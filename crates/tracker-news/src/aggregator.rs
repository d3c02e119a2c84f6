//! News aggregation pipeline
//!
//! `NewsAggregator` owns the two outbound collaborators and runs
//! validate → search → (summarize ∥ classify) → assemble for each request.

use crate::api::{DeepSearchClient, DeepSearchRequest, SearchProvider};
use crate::error::{NewsError, Result};
use crate::prompts::news_prompt;
use crate::result::AggregatedResult;
use crate::sentiment::SentimentClassifier;
use crate::summary::Summarizer;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use tracker_llm::{LLMProvider, MistralConfig, MistralProvider};
use tracker_utils::TrackerConfig;

const DEFAULT_SEARCH_MODEL: &str = "jina-deepsearch-v1";

fn mistral_config(config: &TrackerConfig, key: &str) -> MistralConfig {
    MistralConfig::new(key)
        .with_api_base(&config.llm_api_base)
        .with_model(&config.llm_model)
        .with_timeout(config.llm_timeout)
}

/// Fetches news for a coin and derives a summary and sentiment from it
pub struct NewsAggregator {
    search: Option<Arc<dyn SearchProvider>>,
    summarizer: Summarizer,
    classifier: SentimentClassifier,
    search_model: String,
}

impl NewsAggregator {
    /// Create an aggregator from already-built collaborators
    ///
    /// `None` stands for an unconfigured API key; requests then return a
    /// degraded result without touching the network.
    pub fn new(
        search: Option<Arc<dyn SearchProvider>>,
        llm: Option<Arc<dyn LLMProvider>>,
    ) -> Self {
        Self {
            search,
            summarizer: Summarizer::new(llm.clone()),
            classifier: SentimentClassifier::new(llm),
            search_model: DEFAULT_SEARCH_MODEL.to_string(),
        }
    }

    /// Override the search model identifier
    pub fn with_search_model(mut self, model: impl Into<String>) -> Self {
        self.search_model = model.into();
        self
    }

    /// Build the real HTTP collaborators for whichever keys are configured
    pub fn from_config(config: &TrackerConfig) -> Result<Self> {
        let search = match &config.search_api_key {
            Some(key) => {
                let client =
                    DeepSearchClient::new(key, &config.search_api_base, config.search_timeout)?;
                Some(Arc::new(client) as Arc<dyn SearchProvider>)
            }
            None => {
                warn!("Search API key not configured; responses will be degraded");
                None
            }
        };

        let llm = match &config.llm_api_key {
            Some(key) => {
                let provider = MistralProvider::with_config(mistral_config(config, key))?;
                Some(Arc::new(provider) as Arc<dyn LLMProvider>)
            }
            None => {
                warn!("Language-model API key not configured; responses will be degraded");
                None
            }
        };

        Ok(Self::new(search, llm).with_search_model(&config.search_model))
    }

    /// Whether both collaborators are available
    pub fn has_credentials(&self) -> bool {
        self.search.is_some() && self.summarizer.is_configured()
    }

    /// Fetch news and sentiment for a coin
    ///
    /// Never fails: any error becomes a degraded result carrying `error`,
    /// placeholder `content`, no URLs and Neutral sentiment.
    #[instrument(skip(self))]
    pub async fn fetch_news_and_sentiment(&self, coin: &str) -> AggregatedResult {
        info!("Fetching news and sentiment for {coin}");

        match self.try_fetch(coin).await {
            Ok(result) => {
                info!("Processed result successfully");
                result
            }
            Err(e) => {
                error!("News aggregation failed: {e}");
                AggregatedResult::degraded(&e)
            }
        }
    }

    async fn try_fetch(&self, coin: &str) -> Result<AggregatedResult> {
        let search = match &self.search {
            Some(search) if self.summarizer.is_configured() => search,
            _ => return Err(NewsError::MissingCredentials),
        };

        let prompt = news_prompt(coin);
        info!("Using prompt: {prompt}");

        let found = search
            .search(DeepSearchRequest::new(&self.search_model, prompt))
            .await?;

        // Both calls only read the article text.
        let (content, sentiment) = tokio::join!(
            self.summarizer.summarize(&found.raw_content),
            self.classifier.classify(&found.raw_content),
        );

        Ok(AggregatedResult::success(
            content,
            found.visited_urls,
            sentiment,
        ))
    }
}
