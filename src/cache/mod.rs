//! Cache module for storing exchange rates to disk
//!
//! `CacheManager` persists JSON blobs by key in the XDG cache directory.
//! `RateCache` builds the single-snapshot rate cache on top of it, answering
//! whether the stored snapshot is still within its time-to-live.

mod manager;
mod rates;

pub use manager::{CacheError, CacheManager};
pub use rates::{CachedData, RateCache, DEFAULT_TTL_MINUTES, RATES_CACHE_KEY};
