//! API clients for news search providers

pub mod deepsearch;

pub use deepsearch::{
    ALLOWED_HOSTNAMES, DeepSearchClient, DeepSearchRequest, REASONING_EFFORT, SearchProvider,
};

#[cfg(test)]
pub use deepsearch::MockSearchProvider;
