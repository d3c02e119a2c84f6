//! Mistral provider implementation
//!
//! This module implements the LLMProvider trait for Mistral's chat
//! completions endpoint. See: https://docs.mistral.ai/api/#tag/chat
//!
//! # Examples
//!
//! ```no_run
//! use tracker_llm::{CompletionRequest, LLMProvider, Message};
//! use std::time::Duration;
//! use tracker_llm::providers::{MistralConfig, MistralProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MistralConfig::new("your-key").with_timeout(Duration::from_secs(60));
//!     let provider = MistralProvider::with_config(config)?;
//!
//!     let request = CompletionRequest::builder(provider.default_model())
//!         .system("Summarize the following text in 200 words.")
//!         .add_message(Message::user("Bitcoin rallied past..."))
//!         .build();
//!
//!     let response = provider.complete(request).await?;
//!     println!("{}", response.text());
//!     Ok(())
//! }
//! ```
//!
//! The wire format is the common chat-completions shape, so any compatible
//! endpoint works through [`MistralConfig::with_api_base`].

use crate::{CompletionRequest, CompletionResponse, LLMProvider, Message, Result, Role, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_MISTRAL_API_BASE: &str = "https://api.mistral.ai/v1";
const DEFAULT_MISTRAL_MODEL: &str = "mistral-large-latest";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the Mistral provider
#[derive(Debug, Clone)]
pub struct MistralConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the API (default: "https://api.mistral.ai/v1")
    pub api_base: String,

    /// Model used when a request names none
    pub model: String,

    /// Request timeout (default: 60 s)
    pub timeout: Duration,
}

impl MistralConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_MISTRAL_API_BASE.to_string(),
            model: DEFAULT_MISTRAL_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the default model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Mistral chat-completions provider
pub struct MistralProvider {
    client: Client,
    config: MistralConfig,
}

impl MistralProvider {
    /// Create a new Mistral provider with custom configuration
    pub fn with_config(config: MistralConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(crate::LLMError::ConfigurationError(
                "Mistral API key must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new Mistral provider with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(MistralConfig::new(api_key))
    }

    /// Get the current configuration
    pub fn config(&self) -> &MistralConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_base)
    }
}

#[async_trait]
impl LLMProvider for MistralProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending request to Mistral API at {}", self.config.api_base);

        let model = if request.model.is_empty() {
            self.config.model.clone()
        } else {
            request.model
        };

        let body = ChatRequest {
            messages: build_chat_messages(request.system, request.messages),
            model: model.clone(),
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(crate::LLMError::from_status(status, error_text, &model));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            crate::LLMError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        parse_chat_response(chat_response)
    }

    fn default_model(&self) -> &str {
        &self.config.model
    }

    fn name(&self) -> &'static str {
        "mistral"
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

/// System prompt goes first in the messages array
fn build_chat_messages(system: Option<String>, messages: Vec<Message>) -> Vec<Message> {
    system
        .map(Message::system)
        .into_iter()
        .chain(messages)
        .collect()
}

fn parse_chat_response(response: ChatResponse) -> Result<CompletionResponse> {
    let choice = response.choices.into_iter().next().ok_or_else(|| {
        crate::LLMError::UnexpectedResponse("No choices in response".to_string())
    })?;

    let content = choice.message.content.ok_or_else(|| {
        crate::LLMError::UnexpectedResponse("Choice carries no message content".to_string())
    })?;

    let usage = response.usage.map(|u| TokenUsage {
        input_tokens: u.prompt_tokens,
        output_tokens: u.completion_tokens,
    });

    if let Some(usage) = &usage {
        debug!(
            "Received response - tokens: {}/{}",
            usage.input_tokens, usage.output_tokens
        );
    }

    Ok(CompletionResponse {
        message: Message {
            role: Role::Assistant,
            content,
        },
        usage,
    })
}

// ============================================================================
// Tests
// ============================================================================
