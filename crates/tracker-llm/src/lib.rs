//! Language-model abstraction layer for trendtracker
//!
//! This crate provides provider-agnostic types for talking to chat-completion
//! style language models:
//!
//! - Message types for LLM communication
//! - Completion request/response types
//! - Provider trait for LLM implementations
//! - A Mistral chat-completions provider

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;
pub use providers::{MistralConfig, MistralProvider};
