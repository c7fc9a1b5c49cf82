//! Core data models for the currency converter
//!
//! This module contains the currency metadata table, the exchange rate
//! snapshot type shared by the cache and the loader, and the ephemeral
//! conversion request built from user input.

pub mod currencies;
pub mod rates;

pub use currencies::{all_currencies, get_currency, search_currencies};
pub use rates::{LoadedRates, RateLoader, RateSource, RatesError};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Exchange rates keyed by ISO 4217 currency code, relative to a base currency
pub type Rates = HashMap<String, f64>;

/// Static metadata describing a supported currency
///
/// Uses `&'static str` fields so the whole table can live in a static array.
/// Only `Serialize` is implemented; look currencies up by code with
/// [`get_currency`] instead of deserializing them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Currency {
    /// ISO 4217 code (e.g. "USD")
    pub code: &'static str,
    /// Display name (e.g. "US Dollar")
    pub name: &'static str,
    /// Plural display name (e.g. "US dollars")
    pub name_plural: &'static str,
    /// International symbol
    pub symbol: &'static str,
    /// Symbol as written in the currency's home locale
    pub symbol_native: &'static str,
    /// Number of digits shown after the decimal separator
    pub decimal_digits: u8,
    /// Cash rounding increment, 0 when none applies
    pub rounding: f64,
    /// ISO 3166-1 alpha-2 code of the country whose flag represents the currency
    pub country_code: &'static str,
    /// URL of the flag image
    pub flag_src: &'static str,
}

/// One complete set of fetched rates plus the time it was fetched
///
/// Serialized as `{ base, rates, timestamp, date }` with `timestamp` in epoch
/// milliseconds. A snapshot is never partially updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Code of the currency every rate is expressed against
    pub base: String,
    /// Rate of each currency relative to `base`
    pub rates: Rates,
    /// When the snapshot was fetched
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Publication date reported by the rates provider
    pub date: String,
}

impl RateSnapshot {
    /// Age of the snapshot at `now`
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.timestamp
    }

    /// Whether the snapshot is younger than `ttl` at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) < ttl
    }
}

/// A single conversion the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Amount as typed, e.g. "12.5"
    pub amount: String,
    /// Source currency code
    pub from: String,
    /// Target currency code
    pub to: String,
}

impl ConversionRequest {
    pub fn new(amount: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Parsed amount, `None` when empty, malformed or not positive
    pub fn amount_value(&self) -> Option<f64> {
        crate::convert::parse_amount(&self.amount)
    }
}
