//! FDIC BankFind API client with rate limiting.

use crate::error::{DataError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};

/// FDIC BankFind API base URL
const FDIC_BASE_URL: &str = "https://banks.data.fdic.gov/api";

/// Default rate limit: 4 requests per second (polite default for a public API)
const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(250);

/// User agent for FDIC requests
const USER_AGENT: &str = "Hobart-BankMetrics/0.1 (contact@factordynamics.io)";

/// Maximum rows requested per query; the BankFind API caps pages at 10,000.
const PAGE_LIMIT: u32 = 10_000;

/// Top-level BankFind response.
///
/// The API wraps every row in its own `data` envelope:
/// `{"data": [{"data": {...}, "score": ...}, ...], "totals": {...}}`
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    data: Vec<Envelope>,
}

/// A single wrapped row.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: serde_json::Map<String, Value>,
}

/// Rate limiter to avoid hammering the public endpoint
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// FDIC BankFind API client with rate limiting
pub struct FdicClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    base_url: String,
}

impl FdicClient {
    /// Create a new FDIC client with default settings (4 req/sec)
    pub fn new() -> Result<Self> {
        Self::with_rate_limit(DEFAULT_RATE_LIMIT)
    }

    /// Create a new FDIC client with custom rate limit
    ///
    /// # Arguments
    /// * `min_interval` - Minimum duration between requests
    ///
    /// # Example
    /// ```no_run
    /// use hobart_data::fdic::FdicClient;
    /// use std::time::Duration;
    ///
    /// # fn example() -> hobart_data::Result<()> {
    /// // 2 requests per second
    /// let client = FdicClient::with_rate_limit(Duration::from_millis(500))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_rate_limit(min_interval: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(min_interval))),
            base_url: FDIC_BASE_URL.to_string(),
        })
    }

    /// Query a BankFind endpoint and return the unwrapped rows.
    ///
    /// # Arguments
    /// * `endpoint` - API endpoint name (`institutions` or `financials`)
    /// * `filters` - BankFind filter expression, e.g. `CERT:32541`
    /// * `fields` - Comma-separated field codes to request
    pub(crate) async fn query(
        &self,
        endpoint: &str,
        filters: &str,
        fields: &str,
    ) -> Result<Vec<serde_json::Map<String, Value>>> {
        // Rate limit
        self.rate_limiter.lock().await.wait().await;

        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("filters", filters),
                ("fields", fields),
                ("limit", &PAGE_LIMIT.to_string()),
            ])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(DataError::Network)?;

        if !response.status().is_success() {
            return Err(DataError::FdicApi(format!(
                "Failed to query {}: HTTP {}",
                endpoint,
                response.status()
            )));
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| DataError::FdicApi(format!("Failed to parse {} response: {}", endpoint, e)))?;

        Ok(body.data.into_iter().map(|e| e.data).collect())
    }
}

impl Default for FdicClient {
    fn default() -> Self {
        Self::new().expect("Failed to create FDIC client")
    }
}

impl std::fmt::Debug for FdicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FdicClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
