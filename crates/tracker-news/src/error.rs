//! Error types for news aggregation

use thiserror::Error;

/// Errors raised while gathering news for a coin
#[derive(Debug, Error)]
pub enum NewsError {
    /// One or both API keys are not configured
    #[error("API configuration error")]
    MissingCredentials,

    /// The search API answered with something other than 200
    #[error("API request failed with status {0}")]
    UpstreamStatus(u16),

    /// The search API did not answer in time
    #[error("Request timeout")]
    Timeout,

    /// The search API answered 200 without usable choices
    #[error("Invalid API response")]
    InvalidResponse,

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Language-model error
    #[error("LLM error: {0}")]
    Llm(#[from] tracker_llm::LLMError),
}

/// Result type alias for news operations
pub type Result<T> = std::result::Result<T, NewsError>;

impl From<reqwest::Error> for NewsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }
}

impl NewsError {
    /// Text shown in place of the news digest when this error ends a request
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "Unable to fetch news data due to missing API keys.",
            Self::UpstreamStatus(_) => "Unable to fetch news data at this time.",
            Self::Timeout => "Request timed out. Please try again.",
            Self::InvalidResponse => "No content available",
            _ => "An error occurred while fetching news data.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NewsError::UpstreamStatus(503).to_string(),
            "API request failed with status 503"
        );
        assert_eq!(NewsError::Timeout.to_string(), "Request timeout");
        assert_eq!(
            NewsError::MissingCredentials.to_string(),
            "API configuration error"
        );
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            NewsError::InvalidResponse.placeholder(),
            "No content available"
        );

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            NewsError::from(json_err).placeholder(),
            "An error occurred while fetching news data."
        );
    }

    #[test]
    fn test_llm_conversion() {
        let err: NewsError = tracker_llm::LLMError::AuthenticationFailed.into();
        assert!(err.to_string().starts_with("LLM error"));
    }
}
