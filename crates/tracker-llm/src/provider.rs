//! LLM provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for LLM providers
///
/// Implementations give access to a chat-completion service. The news
/// pipeline only ever depends on this trait, so tests swap in fakes.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a completion from the LLM
    ///
    /// # Arguments
    ///
    /// * `request` - The completion request with system prompt, messages and parameters
    ///
    /// # Returns
    ///
    /// The completion response with the assistant's message and metadata
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Model used when the caller does not name one
    fn default_model(&self) -> &str;

    /// Get the provider name (e.g., "mistral")
    fn name(&self) -> &str;
}
