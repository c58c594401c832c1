//! Integration layer wiring acquisition, caching, and derivation
//! together for the CLI.

pub(crate) mod cache_manager;
pub(crate) mod data_pipeline;
