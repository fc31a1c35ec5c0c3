//! Weekend Package

use jiff::civil::Date;

use crate::{
    pricing::Price,
    ticket_types::{CalculatePrice, PricingError, TicketTypeDetails, surcharged_price},
};

/// Surcharge per included event, in major units.
const PER_EVENT_SURCHARGE: i64 = 20;

/// Access to every listed event across a race weekend.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekendPackage {
    details: TicketTypeDetails,
    start_date: Date,
    end_date: Date,
    included_events: Vec<String>,
}

impl WeekendPackage {
    /// Create a new weekend package.
    pub fn new(
        details: TicketTypeDetails,
        start_date: Date,
        end_date: Date,
        included_events: Vec<String>,
    ) -> Self {
        Self {
            details,
            start_date,
            end_date,
            included_events,
        }
    }

    /// Shared ticket type details
    pub fn details(&self) -> &TicketTypeDetails {
        &self.details
    }

    /// Mutable shared ticket type details
    pub fn details_mut(&mut self) -> &mut TicketTypeDetails {
        &mut self.details
    }

    /// First day of the weekend
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Last day of the weekend
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Events included in the package, in running order
    pub fn included_events(&self) -> &[String] {
        &self.included_events
    }
}

impl CalculatePrice for WeekendPackage {
    /// `(base_price + 20 * events) * quantity`
    fn calculate_price(&self, quantity: u32) -> Result<Price, PricingError> {
        surcharged_price(
            &self.details.base_price(),
            PER_EVENT_SURCHARGE,
            self.included_events.len(),
            quantity,
        )
    }
}
