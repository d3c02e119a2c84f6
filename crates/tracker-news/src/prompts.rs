//! Prompt texts used by the news pipeline

use tracker_llm::{CompletionRequest, Message};

/// System instruction for the summary call
pub const SUMMARY_SYSTEM_PROMPT: &str = "Summarize the following text in 200 words.";

/// System instruction for the sentiment call
pub const SENTIMENT_SYSTEM_PROMPT: &str = "Extract the sentiment of the following text. \
The sentiment can be bullish, bearish or neutral. Reply in one word";

/// Coin used when the caller does not name one
pub const DEFAULT_COIN: &str = "bitcoin";

/// Search prompt for a coin
pub fn news_prompt(coin: &str) -> String {
    format!("Provide the latest news and current market sentiment for {coin}.")
}

/// Two-message completion request: a fixed instruction plus the article text
pub(crate) fn instruction_request(model: &str, system: &str, text: &str) -> CompletionRequest {
    CompletionRequest::builder(model)
        .system(system)
        .add_message(Message::user(text))
        .build()
}
