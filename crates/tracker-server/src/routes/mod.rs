//! Route handlers.

pub mod news;
