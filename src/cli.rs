//! Command-line interface parsing for fxconv
//!
//! This module handles parsing of CLI arguments using clap. With an AMOUNT the
//! program converts once and prints the result; without one it opens the
//! interactive converter.

use chrono::Duration;
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::Config;
use crate::convert::{
    convert, exchange_rate, format_amount, format_rate, normalize_amount_input, parse_amount,
    require_amount, ConvertError,
};
use crate::data::currencies::normalize_code;
use crate::data::{all_currencies, get_currency, ConversionRequest, Currency, RateSnapshot};

/// Pair used by one-shot conversions when no flag is given
const DEFAULT_FROM: &str = "USD";
const DEFAULT_TO: &str = "EUR";

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The currency code is not in the supported table
    #[error("Unknown currency: '{0}'. Run with --list to see supported currencies")]
    UnknownCurrency(String),

    /// The amount is not a positive decimal number
    #[error("Invalid amount: '{0}'. Expected a positive number such as 12.50")]
    InvalidAmount(String),
}

/// fxconv - Convert amounts between currencies using live exchange rates
#[derive(Parser, Debug)]
#[command(name = "fxconv")]
#[command(about = "Currency converter with live rates and offline cache")]
#[command(version)]
pub struct Cli {
    /// Amount to convert once and print; omit to open the interactive converter
    ///
    /// Examples:
    ///   fxconv                          # Interactive converter
    ///   fxconv 100 --from usd --to jpy  # Print 100 USD in JPY
    ///   fxconv 12,50 --to gbp           # Comma works as decimal separator
    #[arg(value_name = "AMOUNT")]
    pub amount: Option<String>,

    /// Source currency code (e.g. USD)
    #[arg(long, short, value_name = "CODE")]
    pub from: Option<String>,

    /// Target currency code (e.g. EUR)
    #[arg(long, short, value_name = "CODE")]
    pub to: Option<String>,

    /// Use cached rates only, without contacting the rates API
    #[arg(long)]
    pub offline: bool,

    /// List supported currencies and exit
    #[arg(long)]
    pub list: bool,

    /// Rates endpoint to query
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Directory for cached rates, preferences and the log file
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Seconds before cached rates are considered stale
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u32).range(1..))]
    pub ttl_secs: Option<u32>,
}

/// What the program does after parsing arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Open the terminal UI
    Interactive,
    /// Convert once and print
    Convert(ConversionRequest),
    /// Print the currency table
    List,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    pub mode: Mode,
    /// Source currency override for the interactive converter
    pub from: Option<String>,
    /// Target currency override for the interactive converter
    pub to: Option<String>,
    /// Skip the network and use cached rates
    pub offline: bool,
    pub config: Config,
}

/// Parses a currency code argument, case-insensitively.
///
/// # Returns
/// * `Ok(&Currency)` if the code is in the currency table
/// * `Err(CliError::UnknownCurrency)` otherwise
pub fn parse_currency_arg(s: &str) -> Result<&'static Currency, CliError> {
    get_currency(&normalize_code(s)).ok_or_else(|| CliError::UnknownCurrency(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if a currency code or the amount is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let from = cli
            .from
            .as_deref()
            .map(parse_currency_arg)
            .transpose()?
            .map(|currency| currency.code.to_string());
        let to = cli
            .to
            .as_deref()
            .map(parse_currency_arg)
            .transpose()?
            .map(|currency| currency.code.to_string());

        let mut config = Config::default();
        if let Some(ref url) = cli.api_url {
            config.api_url = url.clone();
        }
        if let Some(ref dir) = cli.cache_dir {
            config.cache_dir = Some(dir.clone());
        }
        if let Some(secs) = cli.ttl_secs {
            config.ttl = Duration::seconds(i64::from(secs));
        }

        let mode = if cli.list {
            Mode::List
        } else if let Some(ref amount) = cli.amount {
            if parse_amount(amount).is_none() {
                return Err(CliError::InvalidAmount(amount.clone()));
            }
            Mode::Convert(ConversionRequest::new(
                normalize_amount_input(amount.trim()),
                from.as_deref().unwrap_or(DEFAULT_FROM),
                to.as_deref().unwrap_or(DEFAULT_TO),
            ))
        } else {
            Mode::Interactive
        };

        Ok(StartupConfig {
            mode,
            from,
            to,
            offline: cli.offline,
            config,
        })
    }
}

/// Formats a one-shot conversion as printed on stdout
///
/// ```text
/// 100.00 USD = 90.00 EUR
/// 1 USD = 0.900000 EUR
/// 1 EUR = 1.111111 USD
/// Rates as of 2024-07-15 (base USD)
/// ```
pub fn conversion_report(
    request: &ConversionRequest,
    snapshot: &RateSnapshot,
) -> Result<String, ConvertError> {
    let amount = require_amount(&request.amount)?;
    let converted = convert(amount, &request.from, &request.to, &snapshot.rates)?;
    let rate = exchange_rate(&request.from, &request.to, &snapshot.rates)?;
    let inverse = exchange_rate(&request.to, &request.from, &snapshot.rates)?;

    Ok(format!(
        "{} {} = {} {}\n1 {} = {} {}\n1 {} = {} {}\nRates as of {} (base {})\n",
        format_amount(amount, &request.from),
        request.from,
        format_amount(converted, &request.to),
        request.to,
        request.from,
        format_rate(rate),
        request.to,
        request.to,
        format_rate(inverse),
        request.from,
        snapshot.date,
        snapshot.base,
    ))
}

/// Table of supported currencies for `--list`
pub fn currency_listing() -> String {
    all_currencies()
        .iter()
        .map(|currency| {
            format!(
                "{:<5}{:<6}{} ({} decimals)\n",
                currency.code, currency.symbol, currency.name, currency.decimal_digits
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Rates;
    use chrono::Utc;

    fn snapshot() -> RateSnapshot {
        let mut rates = Rates::new();
        rates.insert("USD".to_string(), 1.0);
        rates.insert("EUR".to_string(), 0.9);
        rates.insert("JPY".to_string(), 150.0);
        RateSnapshot {
            base: "USD".to_string(),
            rates,
            timestamp: Utc::now(),
            date: "2024-07-15".to_string(),
        }
    }

    #[test]
    fn test_parse_currency_arg_is_case_insensitive() {
        assert_eq!(parse_currency_arg("usd").unwrap().code, "USD");
        assert_eq!(parse_currency_arg(" Eur ").unwrap().code, "EUR");
    }

    #[test]
    fn test_parse_currency_arg_invalid() {
        let err = parse_currency_arg("XYZ").unwrap_err();
        assert!(err.to_string().contains("Unknown currency"));
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn test_cli_parse_no_args_is_interactive() {
        let cli = Cli::parse_from(["fxconv"]);
        let startup = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(startup.mode, Mode::Interactive);
        assert!(startup.from.is_none());
        assert!(!startup.offline);
        assert_eq!(startup.config, Config::default());
    }

    #[test]
    fn test_cli_amount_selects_convert_mode_with_defaults() {
        let cli = Cli::parse_from(["fxconv", "100"]);
        let startup = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(
            startup.mode,
            Mode::Convert(ConversionRequest::new("100", "USD", "EUR"))
        );
    }

    #[test]
    fn test_cli_amount_with_comma_and_pair() {
        let cli = Cli::parse_from(["fxconv", "12,5", "--from", "gbp", "-t", "jpy"]);
        let startup = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(
            startup.mode,
            Mode::Convert(ConversionRequest::new("12.5", "GBP", "JPY"))
        );
    }

    #[test]
    fn test_cli_invalid_amount() {
        let cli = Cli::parse_from(["fxconv", "abc"]);
        let err = StartupConfig::from_cli(&cli).unwrap_err();
        assert!(matches!(err, CliError::InvalidAmount(_)));
    }

    #[test]
    fn test_cli_zero_amount_is_invalid() {
        let cli = Cli::parse_from(["fxconv", "0"]);
        assert!(StartupConfig::from_cli(&cli).is_err());
    }

    #[test]
    fn test_cli_unknown_currency() {
        let cli = Cli::parse_from(["fxconv", "--to", "ABC"]);
        let err = StartupConfig::from_cli(&cli).unwrap_err();
        assert!(matches!(err, CliError::UnknownCurrency(_)));
    }

    #[test]
    fn test_cli_list_wins_over_amount() {
        let cli = Cli::parse_from(["fxconv", "5", "--list"]);
        let startup = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(startup.mode, Mode::List);
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "fxconv",
            "--api-url",
            "http://localhost:8080/rates",
            "--cache-dir",
            "/tmp/fxconv-test",
            "--ttl-secs",
            "60",
            "--offline",
        ]);
        let startup = StartupConfig::from_cli(&cli).unwrap();

        assert!(startup.offline);
        assert_eq!(startup.config.api_url, "http://localhost:8080/rates");
        assert_eq!(
            startup.config.cache_dir,
            Some(PathBuf::from("/tmp/fxconv-test"))
        );
        assert_eq!(startup.config.ttl, Duration::seconds(60));
    }

    #[test]
    fn test_cli_rejects_zero_ttl() {
        assert!(Cli::try_parse_from(["fxconv", "--ttl-secs", "0"]).is_err());
    }

    #[test]
    fn test_conversion_report() {
        let request = ConversionRequest::new("100", "USD", "EUR");
        let report = conversion_report(&request, &snapshot()).unwrap();

        assert!(report.starts_with("100.00 USD = 90.00 EUR\n"));
        assert!(report.contains("1 USD = 0.900000 EUR"));
        assert!(report.contains("1 EUR = 1.111111 USD"));
        assert!(report.contains("Rates as of 2024-07-15 (base USD)"));
    }

    #[test]
    fn test_conversion_report_uses_currency_digits() {
        let request = ConversionRequest::new("1000", "EUR", "JPY");
        let report = conversion_report(&request, &snapshot()).unwrap();

        assert!(report.starts_with("1,000.00 EUR = 166,667 JPY\n"));
    }

    #[test]
    fn test_conversion_report_missing_rate() {
        let request = ConversionRequest::new("1", "USD", "GBP");
        let err = conversion_report(&request, &snapshot()).unwrap_err();
        assert_eq!(err, ConvertError::MissingRate("GBP".to_string()));
    }

    #[test]
    fn test_currency_listing_has_every_currency() {
        let listing = currency_listing();
        assert_eq!(listing.lines().count(), all_currencies().len());
        assert!(listing.contains("JPY"));
        assert!(listing.contains("Japanese Yen (0 decimals)"));
    }
}
