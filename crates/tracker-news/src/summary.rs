//! Article summarization

use crate::error::{NewsError, Result};
use crate::prompts::{SUMMARY_SYSTEM_PROMPT, instruction_request};
use std::sync::Arc;
use tracing::{error, info, instrument};
use tracker_llm::LLMProvider;

/// Shown when no language-model key is configured
pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable due to API configuration error.";

/// Asks the language model for a ~200 word summary of an article
#[derive(Clone)]
pub struct Summarizer {
    provider: Option<Arc<dyn LLMProvider>>,
}

impl Summarizer {
    pub fn new(provider: Option<Arc<dyn LLMProvider>>) -> Self {
        Self { provider }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Summarize, surfacing any failure
    pub(crate) async fn try_summarize(&self, text: &str) -> Result<String> {
        let provider = self.provider.as_ref().ok_or(NewsError::MissingCredentials)?;

        info!("Making summary request to {}", provider.name());
        let request = instruction_request(provider.default_model(), SUMMARY_SYSTEM_PROMPT, text);
        let response = provider.complete(request).await?;

        Ok(response.message.content)
    }

    /// Summarize, substituting placeholder text on failure
    #[instrument(skip_all)]
    pub async fn summarize(&self, text: &str) -> String {
        match self.try_summarize(text).await {
            Ok(summary) => {
                info!("Summary received successfully");
                summary
            }
            Err(NewsError::MissingCredentials) => {
                error!("Missing language-model API key");
                SUMMARY_UNAVAILABLE.to_string()
            }
            Err(e) => {
                error!("Error generating summary: {e}");
                format!("Summary generation failed: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeProvider;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_summary_returned_verbatim() {
        let provider = Arc::new(FakeProvider::replying("  Bitcoin held $60k.\n", "neutral"));
        let summarizer = Summarizer::new(Some(provider.clone()));

        assert_eq!(summarizer.summarize("article").await, "  Bitcoin held $60k.\n");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.systems(), vec![SUMMARY_SYSTEM_PROMPT.to_string()]);
    }

    #[tokio::test]
    async fn test_missing_provider_placeholder() {
        let summarizer = Summarizer::new(None);
        assert!(!summarizer.is_configured());
        assert_eq!(summarizer.summarize("article").await, SUMMARY_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_failure_degrades_locally() {
        let summarizer = Summarizer::new(Some(Arc::new(FakeProvider::failing())));
        let summary = summarizer.summarize("article").await;
        assert_eq!(summary, "Summary generation failed: LLM error: Request timeout");
    }
}
