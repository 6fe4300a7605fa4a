//! Value Parsing

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::iso::{Currency, EUR, GBP, USD};

use crate::config::ConfigError;

/// Look up a supported ISO currency code.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownCurrency`] for codes the storefront doesn't sell in.
pub fn parse_currency(code: &str) -> Result<&'static Currency, ConfigError> {
    match code.trim() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(ConfigError::UnknownCurrency(other.to_string())),
    }
}

/// Parse price string (e.g., "9.99 GBP") into a decimal amount and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), ConfigError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(ConfigError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| ConfigError::InvalidPrice(s.to_string()))?;

    Ok((amount, parse_currency(currency_code)?))
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "15%" for 15%
/// - Decimal format: "0.15" for 15%
///
/// # Errors
///
/// Returns an error if the string is not a decimal number.
pub fn parse_percentage(s: &str) -> Result<Percentage, ConfigError> {
    let trimmed = s.trim();

    if let Some(percent_str) = trimmed.strip_suffix('%') {
        let points = percent_str
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| ConfigError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(points / Decimal::ONE_HUNDRED))
    } else {
        let value = trimmed
            .parse::<Decimal>()
            .map_err(|_err| ConfigError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value))
    }
}
