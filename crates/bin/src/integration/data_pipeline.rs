//! Data pipeline for fetching and preparing universe data.
//!
//! Fetches quarterly financials for the bank universe from the FDIC
//! BankFind API, with SQLite caching to avoid repeated calls. One bank
//! failing to fetch degrades to a warning, not a pipeline failure.

use super::cache_manager;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use hobart::universe::banks::{Bank, BankUniverse};
use hobart_data::{FdicClient, RawPeriodRecord};
use indicatif::ProgressBar;
use std::collections::BTreeMap;

/// Error type for data pipeline operations.
#[derive(Debug, thiserror::Error)]
pub(crate) enum DataPipelineError {
    /// Data fetch error from the FDIC API.
    #[error("Data fetch error: {0}")]
    Fetch(#[from] hobart_data::DataError),
}

/// Configuration for data fetching.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FetchConfig {
    /// Whether to use the cache.
    pub use_cache: bool,
    /// Whether to force refresh (ignore cache).
    pub force_refresh: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            force_refresh: false,
        }
    }
}

/// Default number of concurrent fetches.
const DEFAULT_CONCURRENCY: usize = 10;

/// Fetch reporting periods for every bank in the universe.
///
/// Checks the SQLite cache first, fetches missing banks from the FDIC
/// API concurrently, and stores fresh results back in the cache. The
/// result maps each bank's short display name to its date-sorted
/// reporting periods. Banks that fail to fetch are skipped with a
/// warning on stderr.
pub(crate) async fn fetch_universe_data_with_progress(
    client: &FdicClient,
    universe: &BankUniverse,
    start: NaiveDate,
    end: NaiveDate,
    config: FetchConfig,
    progress: Option<&ProgressBar>,
) -> Result<BTreeMap<String, Vec<RawPeriodRecord>>, DataPipelineError> {
    let cache = if config.use_cache {
        cache_manager::open_cache().ok()
    } else {
        None
    };

    let mut results: BTreeMap<String, Vec<RawPeriodRecord>> = BTreeMap::new();
    let mut banks_to_fetch: Vec<&Bank> = Vec::new();

    // Serve from cache where coverage is sufficient
    for bank in universe.banks() {
        if !config.force_refresh
            && let Some(ref cache) = cache
            && cache.has_financials(&bank.cert, start, end).unwrap_or(false)
            && let Ok(records) = cache.get_financials(&bank.cert, start, end)
        {
            results.insert(bank.short_name.clone(), records);
            continue;
        }
        banks_to_fetch.push(bank);
    }

    if let Some(pb) = progress {
        pb.set_length(universe.banks().len() as u64);
        pb.set_position(results.len() as u64);
        if banks_to_fetch.is_empty() {
            pb.set_message("Loading from cache...");
        } else {
            pb.set_message(format!(
                "Fetching {} banks ({} concurrent)...",
                banks_to_fetch.len(),
                DEFAULT_CONCURRENCY
            ));
        }
    }

    // Fetch the rest concurrently
    let fetched: Vec<(&Bank, Result<Vec<RawPeriodRecord>, hobart_data::DataError>)> =
        stream::iter(banks_to_fetch)
            .map(|bank| async move {
                let outcome = client.fetch_financials(&bank.cert, start, end).await;
                if let Some(pb) = progress {
                    pb.inc(1);
                }
                (bank, outcome)
            })
            .buffer_unordered(DEFAULT_CONCURRENCY)
            .collect()
            .await;

    for (bank, outcome) in fetched {
        match outcome {
            Ok(records) if records.is_empty() => {
                eprintln!("Warning: no reporting periods for {} in range", bank.short_name);
            }
            Ok(records) => {
                if let Some(ref cache) = cache
                    && let Err(e) = cache.put_financials(&records)
                {
                    eprintln!("Warning: failed to cache {}: {}", bank.short_name, e);
                }
                results.insert(bank.short_name.clone(), records);
            }
            Err(e) => {
                eprintln!("Warning: failed to fetch {}: {}", bank.short_name, e);
            }
        }
    }

    Ok(results)
}
