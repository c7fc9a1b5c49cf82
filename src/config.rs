//! Runtime configuration and persisted user preferences
//!
//! `Config` collects the endpoint, cache location and timing knobs, starting
//! from defaults and overridden by CLI flags. `Preferences` remembers the last
//! amount and currency pair between runs.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration as StdDuration;

use crate::cache::{CacheError, CacheManager, RateCache, DEFAULT_TTL_MINUTES};
use crate::convert::sanitize_amount_input;
use crate::data::rates::DEFAULT_API_URL;
use crate::data::{get_currency, RateLoader};

/// Delay between the last keystroke and recomputing the result
pub const DEFAULT_DEBOUNCE_MS: u64 = 250;

/// Cache key for the saved preferences
const PREFERENCES_KEY: &str = "preferences";

/// Settings shared by the interactive and one-shot modes
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Rates endpoint
    pub api_url: String,
    /// Cache directory override; `None` uses the XDG cache directory
    pub cache_dir: Option<PathBuf>,
    /// Maximum age of a cached snapshot before it is refreshed
    pub ttl: Duration,
    /// Debounce applied to amount edits
    pub debounce: StdDuration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cache_dir: None,
            ttl: Duration::minutes(DEFAULT_TTL_MINUTES),
            debounce: StdDuration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl Config {
    /// Cache manager for the configured directory
    pub fn cache_manager(&self) -> Option<CacheManager> {
        match self.cache_dir {
            Some(ref dir) => Some(CacheManager::with_dir(dir.clone())),
            None => CacheManager::new(),
        }
    }

    /// Rate loader wired to the configured endpoint, cache and TTL
    pub fn rate_loader(&self) -> RateLoader {
        let cache = self
            .cache_manager()
            .map(|manager| RateCache::with_manager(manager).with_ttl(self.ttl));
        RateLoader::with_base_url(self.api_url.clone(), cache)
    }
}

/// Last used amount and currency pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub amount: String,
    pub from: String,
    pub to: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            amount: "1".to_string(),
            from: "USD".to_string(),
            to: "EUR".to_string(),
        }
    }
}

impl Preferences {
    /// Loads saved preferences, falling back to defaults
    ///
    /// Codes that are no longer in the currency table are replaced by the
    /// default pair, and an amount the input field would reject by the
    /// default amount.
    pub fn load(store: &CacheManager) -> Self {
        let defaults = Self::default();
        let Some(saved) = store.read::<Preferences>(PREFERENCES_KEY) else {
            return defaults;
        };

        Self {
            amount: sanitize_amount_input(&saved.amount).unwrap_or(defaults.amount),
            from: if get_currency(&saved.from).is_some() {
                saved.from
            } else {
                defaults.from
            },
            to: if get_currency(&saved.to).is_some() {
                saved.to
            } else {
                defaults.to
            },
        }
    }

    /// Saves preferences, replacing the previous ones
    pub fn save(&self, store: &CacheManager) -> Result<(), CacheError> {
        store.write(PREFERENCES_KEY, self)
    }
}
