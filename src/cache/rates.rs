//! Single-snapshot exchange rate cache
//!
//! Holds at most one [`RateSnapshot`] under a fixed key. Freshness is judged
//! from the snapshot's own fetch timestamp, so an entry written by an older
//! run ages correctly.

use chrono::{DateTime, Duration, Utc};

use super::{CacheError, CacheManager};
use crate::data::RateSnapshot;

/// Cache key for the rate snapshot
pub const RATES_CACHE_KEY: &str = "currency_rates_cache";

/// Default time-to-live for cached rates in minutes
pub const DEFAULT_TTL_MINUTES: i64 = 5;

/// Result of reading from cache, including metadata about cache freshness
#[derive(Debug, Clone, PartialEq)]
pub struct CachedData<T> {
    /// The cached data
    pub data: T,
    /// When the data was originally fetched
    pub cached_at: DateTime<Utc>,
    /// Whether the entry is older than the TTL
    pub is_expired: bool,
}

/// Stores the current rate snapshot with a time-to-live
#[derive(Debug, Clone)]
pub struct RateCache {
    manager: CacheManager,
    ttl: Duration,
}

impl RateCache {
    /// Creates a rate cache in the XDG cache directory with the default TTL
    pub fn new() -> Option<Self> {
        CacheManager::new().map(Self::with_manager)
    }

    /// Creates a rate cache on top of an existing manager with the default TTL
    pub fn with_manager(manager: CacheManager) -> Self {
        Self {
            manager,
            ttl: Duration::minutes(DEFAULT_TTL_MINUTES),
        }
    }

    /// Overrides the time-to-live
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn manager(&self) -> &CacheManager {
        &self.manager
    }

    /// Reads the stored snapshot along with whether it has expired at `now`
    pub fn load(&self, now: DateTime<Utc>) -> Option<CachedData<RateSnapshot>> {
        let snapshot: RateSnapshot = self.manager.read(RATES_CACHE_KEY)?;
        let is_expired = !snapshot.is_fresh(now, self.ttl);
        Some(CachedData {
            cached_at: snapshot.timestamp,
            data: snapshot,
            is_expired,
        })
    }

    /// Stored snapshot if `now - timestamp < ttl`, else `None`
    pub fn read_fresh(&self, now: DateTime<Utc>) -> Option<RateSnapshot> {
        self.load(now)
            .filter(|cached| !cached.is_expired)
            .map(|cached| cached.data)
    }

    /// Stored snapshot regardless of age
    pub fn read_any(&self) -> Option<RateSnapshot> {
        self.manager.read(RATES_CACHE_KEY)
    }

    /// Replaces the stored snapshot
    pub fn write(&self, snapshot: &RateSnapshot) -> Result<(), CacheError> {
        self.manager.write(RATES_CACHE_KEY, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Rates;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_cache() -> (RateCache, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = RateCache::with_manager(CacheManager::with_dir(temp_dir.path().to_path_buf()));
        (cache, temp_dir)
    }

    fn snapshot(timestamp: DateTime<Utc>, eur: f64) -> RateSnapshot {
        let mut rates = Rates::new();
        rates.insert("USD".to_string(), 1.0);
        rates.insert("EUR".to_string(), eur);
        RateSnapshot {
            base: "USD".to_string(),
            rates,
            timestamp,
            date: "2024-07-15".to_string(),
        }
    }

    #[test]
    fn test_default_ttl_is_five_minutes() {
        let (cache, _temp_dir) = create_test_cache();
        assert_eq!(cache.ttl(), Duration::minutes(5));
    }

    #[test]
    fn test_write_uses_fixed_key() {
        let (cache, temp_dir) = create_test_cache();
        cache.write(&snapshot(Utc::now(), 0.9)).unwrap();

        let path = temp_dir.path().join("currency_rates_cache.json");
        let content = fs::read_to_string(path).expect("Cache file should exist");
        assert!(content.contains("\"base\""));
        assert!(content.contains("\"rates\""));
        assert!(content.contains("\"timestamp\""));
        assert!(content.contains("\"date\""));
    }

    #[test]
    fn test_read_fresh_within_ttl() {
        let (cache, _temp_dir) = create_test_cache();
        let now = Utc::now();
        cache.write(&snapshot(now - Duration::minutes(2), 0.9)).unwrap();

        let fresh = cache.read_fresh(now).expect("Two minute old cache is fresh");
        assert_eq!(fresh.base, "USD");
    }

    #[test]
    fn test_read_fresh_at_ttl_boundary_is_none() {
        let (cache, _temp_dir) = create_test_cache();
        let written = snapshot(Utc::now(), 0.9);
        cache.write(&written).unwrap();

        // Timestamps are stored with millisecond precision
        let stored_at = cache.read_any().unwrap().timestamp;

        assert!(cache.read_fresh(stored_at + Duration::minutes(5)).is_none());
        assert!(cache
            .read_fresh(stored_at + Duration::minutes(5) - Duration::milliseconds(1))
            .is_some());
    }

    #[test]
    fn test_read_any_ignores_ttl() {
        let (cache, _temp_dir) = create_test_cache();
        let now = Utc::now();
        cache.write(&snapshot(now - Duration::hours(6), 0.9)).unwrap();

        assert!(cache.read_fresh(now).is_none());
        assert!(cache.read_any().is_some());
    }

    #[test]
    fn test_load_reports_expiry() {
        let (cache, _temp_dir) = create_test_cache();
        let now = Utc::now();

        cache.write(&snapshot(now - Duration::minutes(1), 0.9)).unwrap();
        assert!(!cache.load(now).unwrap().is_expired);

        cache.write(&snapshot(now - Duration::minutes(30), 0.9)).unwrap();
        let cached = cache.load(now).unwrap();
        assert!(cached.is_expired);
        assert_eq!(cached.cached_at, cached.data.timestamp);
    }

    #[test]
    fn test_custom_ttl() {
        let (cache, _temp_dir) = create_test_cache();
        let cache = cache.with_ttl(Duration::hours(1));
        let now = Utc::now();
        cache.write(&snapshot(now - Duration::minutes(30), 0.9)).unwrap();

        assert!(cache.read_fresh(now).is_some());
    }

    #[test]
    fn test_write_replaces_snapshot_wholesale() {
        let (cache, _temp_dir) = create_test_cache();
        let now = Utc::now();
        cache.write(&snapshot(now, 0.9)).unwrap();

        let mut replacement = snapshot(now, 0.95);
        replacement.rates.remove("USD");
        cache.write(&replacement).unwrap();

        let stored = cache.read_any().unwrap();
        assert!(!stored.rates.contains_key("USD"));
        assert!((stored.rates["EUR"] - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_empty_cache_reads_none() {
        let (cache, _temp_dir) = create_test_cache();
        assert!(cache.read_any().is_none());
        assert!(cache.read_fresh(Utc::now()).is_none());
        assert!(cache.load(Utc::now()).is_none());
    }
}
