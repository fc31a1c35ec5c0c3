//! Discounts
//!
//! Percentage discounts are configured in percentage points (`15` means 15%)
//! and applied to amounts in minor units.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::Money;
use thiserror::Error;

use crate::{errors::ErrorKind, pricing::Price};

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage points outside `0..=100`.
    #[error("discount must be between 0 and 100%, got {0}%")]
    OutOfRange(Decimal),

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed")]
    PercentConversion,
}

impl DiscountError {
    /// Category of the error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// A discount expressed in percentage points, validated to `0..=100`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscountPercentage(Decimal);

impl DiscountPercentage {
    /// No discount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Validate percentage points.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::OutOfRange`] unless `0 <= points <= 100`.
    pub fn new(points: Decimal) -> Result<Self, DiscountError> {
        if points < Decimal::ZERO || points > Decimal::ONE_HUNDRED {
            return Err(DiscountError::OutOfRange(points));
        }

        Ok(Self(points))
    }

    /// Percentage points, `15` for 15%.
    pub fn points(&self) -> Decimal {
        self.0
    }

    /// The fraction this discount takes off, `0.15` for 15%.
    pub fn as_percentage(&self) -> Percentage {
        Percentage::from(self.0 / Decimal::ONE_HUNDRED)
    }
}

impl fmt::Display for DiscountPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the calculation overflows.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Take `points` percent off `price`.
///
/// Percentage points are not range checked here; callers that accept admin
/// input validate through [`DiscountPercentage::new`] first.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the calculation overflows.
pub fn apply_percentage_off(price: &Price, points: Decimal) -> Result<Price, DiscountError> {
    let percent = Percentage::from(points / Decimal::ONE_HUNDRED);
    let minor = price.to_minor_units();
    let discount = percent_of_minor(&percent, minor)?;

    let discounted = minor
        .checked_sub(discount)
        .ok_or(DiscountError::PercentConversion)?;

    Ok(Money::from_minor(discounted, price.currency()))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn accepts_bounds_inclusive() -> TestResult {
        assert_eq!(DiscountPercentage::new(Decimal::ZERO)?.points(), Decimal::ZERO);
        assert_eq!(
            DiscountPercentage::new(Decimal::ONE_HUNDRED)?.points(),
            Decimal::ONE_HUNDRED
        );

        Ok(())
    }

    #[test]
    fn rejects_out_of_range_points() {
        assert_eq!(
            DiscountPercentage::new(Decimal::from(101)),
            Err(DiscountError::OutOfRange(Decimal::from(101)))
        );
        assert_eq!(
            DiscountPercentage::new(Decimal::from(-1)),
            Err(DiscountError::OutOfRange(Decimal::from(-1)))
        );
    }

    #[test]
    fn displays_as_points() -> TestResult {
        let discount = DiscountPercentage::new(Decimal::new(125, 1))?;

        assert_eq!(discount.to_string(), "12.5%");

        Ok(())
    }

    #[test]
    fn percent_of_minor_calculates_correctly() -> TestResult {
        let percent = Percentage::from(0.25);

        assert_eq!(percent_of_minor(&percent, 200)?, 50);

        Ok(())
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(2.0);

        assert_eq!(
            percent_of_minor(&percent, i64::MAX),
            Err(DiscountError::PercentConversion)
        );
    }

    #[test]
    fn twenty_percent_off_five_hundred() -> TestResult {
        let price = Money::from_minor(50_000, USD);

        let discounted = apply_percentage_off(&price, Decimal::from(20))?;

        assert_eq!(discounted, Money::from_minor(40_000, USD));

        Ok(())
    }

    #[test]
    fn fractional_discounts_round_half_away_from_zero() -> TestResult {
        // 15% of 1.01 is 0.1515, which rounds to 0.15
        let price = Money::from_minor(101, USD);

        let discounted = apply_percentage_off(&price, Decimal::from(15))?;

        assert_eq!(discounted, Money::from_minor(86, USD));

        Ok(())
    }
}
