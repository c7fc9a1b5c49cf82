//! Currency conversion and amount formatting
//!
//! Conversion cross-multiplies through the snapshot's base currency; no
//! rounding happens here. Formatting applies each currency's decimal digit
//! count and groups thousands with `,`.

use log::warn;
use thiserror::Error;

use crate::data::{get_currency, Rates};

/// Digits used when a currency code is not in the table
pub const DEFAULT_DECIMAL_DIGITS: usize = 2;

/// Digits shown for exchange rate lines ("1 USD = 0.912345 EUR")
pub const RATE_DECIMAL_DIGITS: usize = 6;

/// Placeholder for values that cannot be formatted
const ZERO_AMOUNT: &str = "0.00";

/// Errors that can occur when converting an amount
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// The rate table has no usable rate for this currency
    #[error("No exchange rate available for {0}")]
    MissingRate(String),

    /// The amount is not a positive decimal number
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),
}

/// Converts `amount` from one currency to another
///
/// Both rates must be relative to the same base. Equal codes return the
/// amount unchanged without consulting the table.
///
/// # Returns
/// * `Ok(f64)` - `amount / rates[from] * rates[to]`
/// * `Err(ConvertError::MissingRate)` - if either rate is absent, zero or not finite
pub fn convert(amount: f64, from: &str, to: &str, rates: &Rates) -> Result<f64, ConvertError> {
    if from == to {
        return Ok(amount);
    }
    let rate_from = lookup_rate(rates, from)?;
    let rate_to = lookup_rate(rates, to)?;
    Ok(amount / rate_from * rate_to)
}

/// Value of one unit of `from` in `to`
pub fn exchange_rate(from: &str, to: &str, rates: &Rates) -> Result<f64, ConvertError> {
    convert(1.0, from, to, rates)
}

/// Renders an exchange rate with six decimals
pub fn format_rate(rate: f64) -> String {
    format!("{:.*}", RATE_DECIMAL_DIGITS, rate)
}

fn lookup_rate(rates: &Rates, code: &str) -> Result<f64, ConvertError> {
    match rates.get(code) {
        Some(&rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
        _ => {
            warn!("no usable exchange rate for {}", code);
            Err(ConvertError::MissingRate(code.to_string()))
        }
    }
}

/// Formats `value` with the decimal digits configured for `currency_code`
///
/// Unknown codes use two digits. Non-finite values format as "0.00".
pub fn format_amount(value: f64, currency_code: &str) -> String {
    if !value.is_finite() {
        return ZERO_AMOUNT.to_string();
    }

    let digits = get_currency(currency_code)
        .map(|currency| currency.decimal_digits as usize)
        .unwrap_or(DEFAULT_DECIMAL_DIGITS);

    let fixed = format!("{:.*}", digits, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    // Avoid "-0.00" for tiny negatives that round to zero
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, group_thousands(int_part), frac),
        None => format!("{}{}", sign, group_thousands(int_part)),
    }
}

/// Parses `input` and formats it for `currency_code`
///
/// Strings that do not parse as a number format as "0.00".
pub fn format_input(input: &str, currency_code: &str) -> String {
    match normalize_amount_input(input).trim().parse::<f64>() {
        Ok(value) => format_amount(value, currency_code),
        Err(_) => ZERO_AMOUNT.to_string(),
    }
}

/// Inserts `,` between groups of three digits
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Replaces the first `,` with `.` so either decimal separator is accepted
pub fn normalize_amount_input(raw: &str) -> String {
    raw.replacen(',', ".", 1)
}

/// Whether `input` matches `^\d*\.?\d*$`
pub fn is_amount_input(input: &str) -> bool {
    input.chars().all(|c| c.is_ascii_digit() || c == '.') && input.matches('.').count() <= 1
}

/// Filters a candidate value for the amount field
///
/// Returns the normalized text when it is empty or a partial decimal number,
/// `None` when the edit should be rejected.
pub fn sanitize_amount_input(candidate: &str) -> Option<String> {
    let normalized = normalize_amount_input(candidate);
    if normalized.is_empty() || is_amount_input(&normalized) {
        Some(normalized)
    } else {
        None
    }
}

/// Parses an amount typed by the user
///
/// Returns `None` for empty, malformed, zero or negative amounts.
pub fn parse_amount(input: &str) -> Option<f64> {
    let normalized = normalize_amount_input(input.trim());
    if normalized.is_empty() || !is_amount_input(&normalized) {
        return None;
    }
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

/// Parses an amount, reporting the original text on failure
pub fn require_amount(input: &str) -> Result<f64, ConvertError> {
    parse_amount(input).ok_or_else(|| ConvertError::InvalidAmount(input.to_string()))
}
