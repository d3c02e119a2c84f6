//! Deep-search client for crypto news
//!
//! The search API speaks a chat-completions dialect: the prompt goes in as a
//! user message and the researched answer comes back as `choices[0].message.content`,
//! with the pages consulted listed under `visitedURLs`.

use crate::error::{NewsError, Result};
use crate::result::SearchResult;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument};
use tracker_llm::Message;

/// News sites the search is restricted to
pub const ALLOWED_HOSTNAMES: [&str; 10] = [
    "https://cointelegraph.com",
    "https://u.today",
    "https://coindesk.com",
    "https://coincodex.com",
    "https://coingape.com",
    "https://ambcrypto.com",
    "https://crypto.news",
    "https://bitcoinist.com",
    "https://dailyhodl.com",
    "https://beincrypto.com",
];

/// Reasoning effort requested from the search service
pub const REASONING_EFFORT: &str = "low";

/// Request body sent to the search API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeepSearchRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub stream: bool,
    pub reasoning_effort: String,
    pub max_attempts: u32,
    pub no_direct_answer: bool,
    pub only_hostnames: Vec<String>,
}

impl DeepSearchRequest {
    /// Single-shot, non-streaming request restricted to [`ALLOWED_HOSTNAMES`]
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message::user(prompt)],
            stream: false,
            reasoning_effort: REASONING_EFFORT.to_string(),
            max_attempts: 1,
            no_direct_answer: false,
            only_hostnames: ALLOWED_HOSTNAMES.iter().map(ToString::to_string).collect(),
        }
    }

    /// The user prompt carried by this request
    pub fn prompt(&self) -> &str {
        self.messages.first().map_or("", Message::text)
    }
}

/// Source of researched news text
///
/// The aggregator talks to search through this trait so tests can replace
/// the network entirely.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one search request
    async fn search(&self, request: DeepSearchRequest) -> Result<SearchResult>;
}

#[derive(Debug, Deserialize)]
struct DeepSearchResponse {
    #[serde(default)]
    choices: Vec<DeepSearchChoice>,
    #[serde(default, rename = "visitedURLs", alias = "visitedUrls")]
    visited_urls: Value,
}

#[derive(Debug, Deserialize)]
struct DeepSearchChoice {
    message: Option<DeepSearchMessage>,
}

#[derive(Debug, Deserialize)]
struct DeepSearchMessage {
    content: Option<String>,
}

impl DeepSearchResponse {
    fn into_search_result(self) -> Result<SearchResult> {
        let content = self
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or(NewsError::InvalidResponse)?;

        // Entries that are not strings are skipped rather than failing the article.
        let urls = self
            .visited_urls
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .map(ToString::to_string);

        Ok(SearchResult::new(content, urls))
    }
}

/// Parse a 200 response body
fn parse_search_body(body: &str) -> Result<SearchResult> {
    let response: DeepSearchResponse = serde_json::from_str(body)?;
    response.into_search_result()
}

/// HTTP client for the deep-search API
pub struct DeepSearchClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl DeepSearchClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `api_key` - Bearer token for the search API
    /// * `api_base` - Base URL, e.g. "https://deepsearch.jina.ai/v1"
    /// * `timeout` - Upper bound for the whole request, body included
    pub fn new(
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

#[async_trait]
impl SearchProvider for DeepSearchClient {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.api_base))]
    async fn search(&self, request: DeepSearchRequest) -> Result<SearchResult> {
        info!("Making request to search API");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        info!("Search API response status: {}", status.as_u16());

        if status != StatusCode::OK {
            return Err(NewsError::UpstreamStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let result = parse_search_body(&body)?;
        debug!(
            "Search returned {} chars and {} urls",
            result.raw_content.len(),
            result.visited_urls.len()
        );

        Ok(result)
    }
}
