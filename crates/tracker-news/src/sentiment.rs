//! Three-way market sentiment

use crate::error::{NewsError, Result};
use crate::prompts::{SENTIMENT_SYSTEM_PROMPT, instruction_request};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, instrument};
use tracker_llm::LLMProvider;

/// Market sentiment label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl Sentiment {
    /// Map a free-text model reply onto a label
    ///
    /// Case-insensitive substring match; "bullish" wins over "bearish" when
    /// both appear, and anything else is Neutral.
    pub fn from_reply(reply: &str) -> Self {
        let reply = reply.to_lowercase();
        if reply.contains("bullish") {
            Self::Bullish
        } else if reply.contains("bearish") {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "Bullish",
            Self::Bearish => "Bearish",
            Self::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asks the language model for a one-word sentiment of an article
#[derive(Clone)]
pub struct SentimentClassifier {
    provider: Option<Arc<dyn LLMProvider>>,
}

impl SentimentClassifier {
    pub fn new(provider: Option<Arc<dyn LLMProvider>>) -> Self {
        Self { provider }
    }

    /// Classify, surfacing any failure
    pub(crate) async fn try_classify(&self, text: &str) -> Result<Sentiment> {
        let provider = self.provider.as_ref().ok_or(NewsError::MissingCredentials)?;

        info!("Making sentiment request to {}", provider.name());
        let request = instruction_request(provider.default_model(), SENTIMENT_SYSTEM_PROMPT, text);
        let response = provider.complete(request).await?;

        Ok(Sentiment::from_reply(response.text()))
    }

    /// Classify, falling back to Neutral on any failure
    #[instrument(skip_all)]
    pub async fn classify(&self, text: &str) -> Sentiment {
        match self.try_classify(text).await {
            Ok(sentiment) => {
                info!(%sentiment, "Final sentiment");
                sentiment
            }
            Err(e) => {
                error!("Error extracting sentiment: {e}");
                Sentiment::Neutral
            }
        }
    }
}
