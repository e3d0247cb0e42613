//! Money
//!
//! Amounts are carried as integer minor units inside [`rusty_money::Money`] values. Decimal
//! strings only appear at the edges: fixture prices are parsed here, and display goes through
//! `Money`'s own formatting.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{Currency, EUR, GBP, USD};
use thiserror::Error;

/// Minor units per major unit for every supported currency.
const MINOR_PER_MAJOR: i64 = 100;

/// Errors raised while parsing a price or currency.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The price string was not in the `AMOUNT CURRENCY` format or the amount was not a number.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// The amount was below zero.
    #[error("price must not be negative: {0}")]
    Negative(String),

    /// The currency code is not one the shop trades in.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Look up a supported currency by its ISO code.
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] for anything other than GBP, USD or EUR.
pub fn currency_from_code(code: &str) -> Result<&'static Currency, PriceError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(PriceError::UnknownCurrency(other.to_string())),
    }
}

/// Parse a decimal amount (e.g. `"10.00"`) into minor units.
///
/// Amounts with more than two decimal places are rounded half-to-even.
///
/// # Errors
///
/// Returns [`PriceError::InvalidPrice`] for non-numeric or out of range input and
/// [`PriceError::Negative`] for amounts below zero.
pub fn parse_amount(s: &str) -> Result<i64, PriceError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(s.to_string()));
    }

    amount
        .checked_mul(Decimal::from(MINOR_PER_MAJOR))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| PriceError::InvalidPrice(s.to_string()))
}

/// Parse a price string (e.g. `"2.99 GBP"`) into minor units and currency.
///
/// # Errors
///
/// Returns an error if the string is not in the format `AMOUNT CURRENCY`, if the amount
/// cannot be parsed, is negative, or if the currency code is not recognised.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), PriceError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, code] = parts.as_slice() else {
        return Err(PriceError::InvalidPrice(format!(
            "expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    Ok((parse_amount(amount)?, currency_from_code(code)?))
}
