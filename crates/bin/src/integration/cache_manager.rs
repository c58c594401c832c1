//! Cache manager for FDIC data.
//!
//! Handles the SQLite cache with a platform-specific default location.

use hobart_data::cache::SqliteCache;
use hobart_data::error::DataError;
use std::path::PathBuf;

/// Get the default cache directory path.
///
/// Uses platform-specific cache directories:
/// - Linux: `~/.cache/hobart/`
/// - macOS: `~/Library/Caches/hobart/`
/// - Windows: `%LOCALAPPDATA%\hobart\cache\`
pub(crate) fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hobart")
}

/// Get the default cache database path.
pub(crate) fn default_cache_path() -> PathBuf {
    default_cache_dir().join("hobart.db")
}

/// Open the cache, creating the directory if needed.
pub(crate) fn open_cache() -> Result<SqliteCache, DataError> {
    let cache_path = default_cache_path();

    // Ensure parent directory exists
    if let Some(parent) = cache_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    SqliteCache::new(&cache_path)
}

/// Print cache location and contents.
pub(crate) fn print_cache_info() {
    let path = default_cache_path();
    println!("  Cache: {}", path.display());

    if let Ok(cache) = open_cache()
        && let Ok(stats) = cache.get_stats()
    {
        println!(
            "  Cached: {} reporting periods across {} institutions",
            stats.total_periods, stats.unique_certs
        );
    }
}
