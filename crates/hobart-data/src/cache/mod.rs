//! Caching layer for FDIC data.

pub mod sqlite;

pub use sqlite::{CacheStats, SqliteCache};
