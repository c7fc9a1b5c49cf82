//! Exchange rate loader
//!
//! Fetches the latest rates from the vatcomply API and keeps the on-disk
//! snapshot current. When the API cannot be reached the last cached snapshot
//! is returned regardless of its age, flagged as [`RateSource::Cached`].

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration as StdDuration;
use thiserror::Error;

use super::{RateSnapshot, Rates};
use crate::cache::RateCache;

/// Default rates endpoint
pub const DEFAULT_API_URL: &str = "https://api.vatcomply.com/rates";

/// Upper bound for a single rates request
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur when loading exchange rates
#[derive(Debug, Error)]
pub enum RatesError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Rates endpoint returned {0}")]
    Status(StatusCode),

    /// Failed to parse JSON response
    #[error("Failed to parse rates response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The fetch failed and there was no cached snapshot to fall back on
    #[error("Failed to load exchange rates")]
    Unavailable {
        #[source]
        source: Box<RatesError>,
    },
}

/// Where a loaded snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// Fetched from the API just now
    Live,
    /// Read from the cache because the API could not be reached
    Cached,
}

/// Result of a successful load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRates {
    pub snapshot: RateSnapshot,
    pub source: RateSource,
}

impl LoadedRates {
    /// Whether these rates are a stale/offline fallback
    pub fn is_offline(&self) -> bool {
        self.source == RateSource::Cached
    }
}

/// Response body of the rates endpoint
#[derive(Debug, Deserialize)]
struct ApiResponse {
    base: String,
    rates: Rates,
    date: String,
}

/// Loads exchange rates from the API with fallback to the rate cache
#[derive(Debug, Clone)]
pub struct RateLoader {
    /// HTTP client for making requests
    http_client: Client,
    /// Snapshot cache, absent when no cache directory could be determined
    cache: Option<RateCache>,
    /// Rates endpoint (allows override for testing)
    base_url: String,
}

impl Default for RateLoader {
    fn default() -> Self {
        Self::new(RateCache::new())
    }
}

impl RateLoader {
    /// Creates a loader for the default endpoint
    pub fn new(cache: Option<RateCache>) -> Self {
        Self::with_base_url(DEFAULT_API_URL, cache)
    }

    /// Creates a loader for a custom endpoint
    pub fn with_base_url(base_url: impl Into<String>, cache: Option<RateCache>) -> Self {
        let http_client = Client::builder()
            .timeout(StdDuration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            cache,
            base_url: base_url.into(),
        }
    }

    /// The rate cache backing this loader
    pub fn cache(&self) -> Option<&RateCache> {
        self.cache.as_ref()
    }

    /// Cached snapshot that is still within TTL, if any
    pub fn cached_fresh(&self) -> Option<RateSnapshot> {
        self.cache.as_ref()?.read_fresh(Utc::now())
    }

    /// Cached snapshot of any age, if any
    pub fn cached_any(&self) -> Option<RateSnapshot> {
        self.cache.as_ref()?.read_any()
    }

    /// Whether a refresh is due: no cached snapshot, or one older than TTL
    pub fn needs_refresh(&self) -> bool {
        self.cached_fresh().is_none()
    }

    /// Fetches current rates
    ///
    /// # Returns
    /// * `Ok(LoadedRates)` with [`RateSource::Live`] when the API answered
    /// * `Ok(LoadedRates)` with [`RateSource::Cached`] when the API failed but a
    ///   cached snapshot exists (any age)
    /// * `Err(RatesError::Unavailable)` when the API failed and nothing is cached
    pub async fn refresh(&self) -> Result<LoadedRates, RatesError> {
        match self.fetch_from_api().await {
            Ok(snapshot) => {
                if let Some(ref cache) = self.cache {
                    if let Err(e) = cache.write(&snapshot) {
                        warn!("failed to cache rates: {}", e);
                    }
                }
                info!(
                    "loaded {} rates against {} ({})",
                    snapshot.rates.len(),
                    snapshot.base,
                    snapshot.date
                );
                Ok(LoadedRates {
                    snapshot,
                    source: RateSource::Live,
                })
            }
            Err(api_error) => {
                warn!("rates fetch failed: {}", api_error);
                match self.cached_any() {
                    Some(snapshot) => {
                        info!("using cached rates from {}", snapshot.timestamp);
                        Ok(LoadedRates {
                            snapshot,
                            source: RateSource::Cached,
                        })
                    }
                    None => Err(RatesError::Unavailable {
                        source: Box::new(api_error),
                    }),
                }
            }
        }
    }

    /// Fetches rates directly from the API
    async fn fetch_from_api(&self) -> Result<RateSnapshot, RatesError> {
        debug!("GET {}", self.base_url);
        let response = self.http_client.get(&self.base_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RatesError::Status(status));
        }

        let text = response.text().await?;
        parse_response(&text, Utc::now())
    }
}

/// Parses a rates response body into a snapshot stamped with `fetched_at`
///
/// The base currency is added with rate 1 when the provider omits it.
fn parse_response(body: &str, fetched_at: DateTime<Utc>) -> Result<RateSnapshot, RatesError> {
    let response: ApiResponse = serde_json::from_str(body)?;

    let mut rates = response.rates;
    rates.entry(response.base.clone()).or_insert(1.0);

    Ok(RateSnapshot {
        base: response.base,
        rates,
        timestamp: fetched_at,
        date: response.date,
    })
}
