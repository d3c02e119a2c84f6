//! Shared utilities for trendtracker
//!
//! This crate provides the process-wide pieces every other crate leans on:
//! tracing setup and the immutable configuration read once at startup.

pub mod config;
pub mod logging;

pub use config::{ConfigError, TrackerConfig, TrackerConfigBuilder};
pub use logging::init_tracing_with_filter;
