//! Group Discount
//!
//! Wraps another ticket type and takes a percentage off once the purchase
//! reaches the group size.

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    discounts::{DiscountPercentage, apply_percentage_off},
    pricing::Price,
    ticket_types::{CalculatePrice, PricingError, TicketType, TicketTypeDetails},
};

/// A discount for buying at least `group_size` tickets of the base type.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDiscount {
    details: TicketTypeDetails,
    group_size: u32,
    discount_percentage: Decimal,
    base_ticket_type: Box<TicketType>,
}

impl GroupDiscount {
    /// Create a new group discount over `base_ticket_type`.
    ///
    /// The discount percentage is taken as given; admin changes go through
    /// [`TicketType::apply_discount`], which validates it.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidGroupSize`] if `group_size` is zero.
    pub fn new(
        details: TicketTypeDetails,
        group_size: u32,
        discount_percentage: Decimal,
        base_ticket_type: TicketType,
    ) -> Result<Self, PricingError> {
        if group_size == 0 {
            return Err(PricingError::InvalidGroupSize(group_size));
        }

        Ok(Self {
            details,
            group_size,
            discount_percentage,
            base_ticket_type: Box::new(base_ticket_type),
        })
    }

    /// Shared ticket type details
    pub fn details(&self) -> &TicketTypeDetails {
        &self.details
    }

    /// Mutable shared ticket type details
    pub fn details_mut(&mut self) -> &mut TicketTypeDetails {
        &mut self.details
    }

    /// Minimum quantity that qualifies for the discount
    pub fn group_size(&self) -> u32 {
        self.group_size
    }

    /// Discount in percentage points
    pub fn discount_percentage(&self) -> Decimal {
        self.discount_percentage
    }

    /// Ticket type the discount is applied to
    pub fn base_ticket_type(&self) -> &TicketType {
        &self.base_ticket_type
    }

    /// Replace the discount with an already validated percentage.
    pub fn set_discount_percentage(&mut self, discount: DiscountPercentage) {
        self.discount_percentage = discount.points();
    }

    /// Whether buying `quantity` tickets qualifies for the discount.
    pub fn qualifies(&self, quantity: u32) -> bool {
        quantity >= self.group_size
    }
}

impl CalculatePrice for GroupDiscount {
    fn calculate_price(&self, quantity: u32) -> Result<Price, PricingError> {
        let base = self.base_ticket_type.calculate_price(quantity)?;

        if !self.qualifies(quantity) {
            return Ok(base);
        }

        debug!(
            quantity,
            group_size = self.group_size,
            discount = %self.discount_percentage,
            "applying group discount"
        );

        Ok(apply_percentage_off(&base, self.discount_percentage)?)
    }
}
