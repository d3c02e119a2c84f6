//! Concrete LLM provider implementations

pub mod mistral;

pub use mistral::{MistralConfig, MistralProvider};
