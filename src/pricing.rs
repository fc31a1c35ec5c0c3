//! Prices

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money, MoneyError,
    iso::{AUD, Currency, EUR, GBP, USD},
};
use thiserror::Error;

use crate::errors::ErrorKind;

/// A monetary amount in one of the ISO currencies.
pub type Price = Money<'static, Currency>;

/// Anything exposing a price accessor.
///
/// Orders only accept values implementing this, so "has a price" is checked when
/// the crate is compiled rather than when a ticket is added.
pub trait Priced {
    /// Returns the price of the value.
    fn price(&self) -> Price;
}

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl TotalPriceError {
    /// Category of the error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// Errors raised while reading prices from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceParseError {
    /// The text was not `AMOUNT CODE`, or the amount did not fit in minor units.
    #[error("invalid price format: {0}")]
    InvalidPrice(String),

    /// The currency code is not one the catalog supports.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Calculates the total price of a list of priced values.
///
/// An empty list totals zero in `currency`.
///
/// # Errors
///
/// Returns [`TotalPriceError::Money`] if an item is priced in a different currency.
pub fn total_price<T: Priced>(
    currency: &'static Currency,
    items: &[T],
) -> Result<Price, TotalPriceError> {
    let total = items
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, item| {
            acc.add(item.price())
        })?;

    Ok(total)
}

/// Builds a price from a whole number of major units (dollars, pounds, ...).
pub fn major(amount: i64, currency: &'static Currency) -> Price {
    Money::from_major(amount, currency)
}

/// Look up one of the supported currencies by its ISO code.
///
/// # Errors
///
/// Returns [`PriceParseError::UnknownCurrency`] for any other code.
pub fn currency_from_code(code: &str) -> Result<&'static Currency, PriceParseError> {
    match code {
        "AUD" => Ok(AUD),
        "EUR" => Ok(EUR),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        other => Err(PriceParseError::UnknownCurrency(other.to_string())),
    }
}

/// Parse a price string (e.g., "120.50 USD") into minor units and currency.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), PriceParseError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(PriceParseError::InvalidPrice(format!(
            "expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = currency_from_code(code)?;

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| PriceParseError::InvalidPrice(s.to_string()))?;

    let scale = Decimal::from(10_i64.pow(currency.exponent));

    let minor_units = amount
        .checked_mul(scale)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| PriceParseError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

/// Parse a price string straight into a [`Price`].
///
/// # Errors
///
/// See [`parse_price`].
pub fn price_from_str(s: &str) -> Result<Price, PriceParseError> {
    let (minor_units, currency) = parse_price(s)?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Render a price in the `AMOUNT CODE` form accepted by [`parse_price`].
pub fn format_price(price: &Price) -> String {
    format!("{} {}", price.amount(), price.currency().iso_alpha_code)
}
