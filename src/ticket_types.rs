//! Ticket Types
//!
//! The catalog of ticket products. Every variant prices a purchase as a pure
//! function of quantity; none of them touch seat inventory.

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    discounts::{DiscountError, DiscountPercentage},
    errors::ErrorKind,
    pricing::{Price, major},
};

pub mod group_discount;
pub mod season_membership;
pub mod single_race_pass;
pub mod weekend_package;

pub use group_discount::GroupDiscount;
pub use season_membership::SeasonMembership;
pub use single_race_pass::SingleRacePass;
pub use weekend_package::WeekendPackage;

/// Errors raised while pricing or configuring ticket types.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Prices are only defined for one or more tickets.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// Base prices cannot be negative.
    #[error("base price cannot be negative, got {0}")]
    NegativeBasePrice(String),

    /// Group discounts need a group of at least one.
    #[error("group size must be at least 1, got {0}")]
    InvalidGroupSize(u32),

    /// Invalid discount percentage or discount arithmetic failure.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Only group discount ticket types carry an adjustable discount.
    #[error("ticket type {0} does not support discounts")]
    NotDiscountable(String),

    /// The price does not fit in minor units.
    #[error("price calculation overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl PricingError {
    /// Category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PricingError::NotDiscountable(_) => ErrorKind::Contract,
            PricingError::Discount(error) => error.kind(),
            PricingError::ZeroQuantity
            | PricingError::NegativeBasePrice(_)
            | PricingError::InvalidGroupSize(_)
            | PricingError::Overflow
            | PricingError::Money(_) => ErrorKind::Validation,
        }
    }
}

/// Prices a purchase of `quantity` tickets.
pub trait CalculatePrice {
    /// Total price for `quantity` tickets of this type.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::ZeroQuantity`] for a quantity of zero and
    /// [`PricingError::Overflow`] if the total does not fit in minor units.
    fn calculate_price(&self, quantity: u32) -> Result<Price, PricingError>;
}

/// Fields shared by every ticket type.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketTypeDetails {
    type_name: String,
    base_price: Price,
    description: String,
}

impl TicketTypeDetails {
    /// Create the shared details of a ticket type.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NegativeBasePrice`] if `base_price` is below zero.
    pub fn new(
        type_name: impl Into<String>,
        base_price: Price,
        description: impl Into<String>,
    ) -> Result<Self, PricingError> {
        ensure_non_negative(&base_price)?;

        Ok(Self {
            type_name: type_name.into(),
            base_price,
            description: description.into(),
        })
    }

    /// Display name of the ticket type
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Starting price before variant surcharges
    pub fn base_price(&self) -> Price {
        self.base_price
    }

    /// What the ticket includes
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Rename the ticket type
    pub fn set_type_name(&mut self, type_name: impl Into<String>) {
        self.type_name = type_name.into();
    }

    /// Change the base price.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NegativeBasePrice`] if `base_price` is below zero.
    pub fn set_base_price(&mut self, base_price: Price) -> Result<(), PricingError> {
        ensure_non_negative(&base_price)?;
        self.base_price = base_price;

        Ok(())
    }

    /// Change the description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }
}

/// A ticket product offered for sale.
#[derive(Debug, Clone, PartialEq)]
pub enum TicketType {
    /// Admission to one race day
    SingleRacePass(SingleRacePass),

    /// Every event across a race weekend
    WeekendPackage(WeekendPackage),

    /// Membership for a whole season
    SeasonMembership(SeasonMembership),

    /// Another ticket type, discounted for large groups
    GroupDiscount(GroupDiscount),
}

impl TicketType {
    /// Shared details of the ticket type.
    pub fn details(&self) -> &TicketTypeDetails {
        match self {
            TicketType::SingleRacePass(pass) => pass.details(),
            TicketType::WeekendPackage(package) => package.details(),
            TicketType::SeasonMembership(membership) => membership.details(),
            TicketType::GroupDiscount(group) => group.details(),
        }
    }

    /// Mutable access to the shared details.
    pub fn details_mut(&mut self) -> &mut TicketTypeDetails {
        match self {
            TicketType::SingleRacePass(pass) => pass.details_mut(),
            TicketType::WeekendPackage(package) => package.details_mut(),
            TicketType::SeasonMembership(membership) => membership.details_mut(),
            TicketType::GroupDiscount(group) => group.details_mut(),
        }
    }

    /// Display name of the ticket type.
    pub fn type_name(&self) -> &str {
        self.details().type_name()
    }

    /// Currency the ticket type is priced in.
    ///
    /// Group discounts are priced in the currency of the ticket type they wrap.
    pub fn currency(&self) -> &'static Currency {
        match self {
            TicketType::GroupDiscount(group) => group.base_ticket_type().currency(),
            other => other.details().base_price().currency(),
        }
    }

    /// Set the discount percentage of a group discount.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Discount`] unless `0 <= points <= 100`, and
    /// [`PricingError::NotDiscountable`] for every variant other than
    /// [`TicketType::GroupDiscount`].
    pub fn apply_discount(&mut self, points: Decimal) -> Result<(), PricingError> {
        let discount = DiscountPercentage::new(points)?;

        match self {
            TicketType::GroupDiscount(group) => {
                group.set_discount_percentage(discount);

                Ok(())
            }
            other => Err(PricingError::NotDiscountable(other.type_name().to_string())),
        }
    }

    /// One-line description with the price of a single ticket.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the single ticket price cannot be calculated.
    pub fn summary(&self) -> Result<String, PricingError> {
        let details = self.details();

        Ok(format!(
            "{}: {}\nPrice: {}",
            details.type_name(),
            details.description(),
            self.calculate_price(1)?
        ))
    }
}

impl CalculatePrice for TicketType {
    fn calculate_price(&self, quantity: u32) -> Result<Price, PricingError> {
        match self {
            TicketType::SingleRacePass(pass) => pass.calculate_price(quantity),
            TicketType::WeekendPackage(package) => package.calculate_price(quantity),
            TicketType::SeasonMembership(membership) => membership.calculate_price(quantity),
            TicketType::GroupDiscount(group) => group.calculate_price(quantity),
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl From<SingleRacePass> for TicketType {
    fn from(value: SingleRacePass) -> Self {
        TicketType::SingleRacePass(value)
    }
}

impl From<WeekendPackage> for TicketType {
    fn from(value: WeekendPackage) -> Self {
        TicketType::WeekendPackage(value)
    }
}

impl From<SeasonMembership> for TicketType {
    fn from(value: SeasonMembership) -> Self {
        TicketType::SeasonMembership(value)
    }
}

impl From<GroupDiscount> for TicketType {
    fn from(value: GroupDiscount) -> Self {
        TicketType::GroupDiscount(value)
    }
}

fn ensure_non_negative(price: &Price) -> Result<(), PricingError> {
    if price.is_negative() {
        return Err(PricingError::NegativeBasePrice(price.to_string()));
    }

    Ok(())
}

/// `(base + per_unit_major * units) * quantity`, computed in minor units.
pub(crate) fn surcharged_price(
    base: &Price,
    per_unit_major: i64,
    units: usize,
    quantity: u32,
) -> Result<Price, PricingError> {
    if quantity == 0 {
        return Err(PricingError::ZeroQuantity);
    }

    let currency = base.currency();
    let units = i64::try_from(units).map_err(|_err| PricingError::Overflow)?;

    let surcharge = major(per_unit_major, currency)
        .to_minor_units()
        .checked_mul(units)
        .ok_or(PricingError::Overflow)?;

    let total = base
        .to_minor_units()
        .checked_add(surcharge)
        .and_then(|unit| unit.checked_mul(i64::from(quantity)))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(total, currency))
}
