//! Single Race Pass

use crate::{
    pricing::Price,
    ticket_types::{CalculatePrice, PricingError, TicketTypeDetails, surcharged_price},
};

/// Flat surcharge added to every single race pass, in major units.
const RACE_DAY_SURCHARGE: i64 = 10;

/// Admission to one race day, in one seat section.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleRacePass {
    details: TicketTypeDetails,
    race_day: String,
    seat_section: String,
}

impl SingleRacePass {
    /// Create a new single race pass.
    pub fn new(
        details: TicketTypeDetails,
        race_day: impl Into<String>,
        seat_section: impl Into<String>,
    ) -> Self {
        Self {
            details,
            race_day: race_day.into(),
            seat_section: seat_section.into(),
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

    /// Which day the race is on
    pub fn race_day(&self) -> &str {
        &self.race_day
    }

    /// Where the pass holder sits
    pub fn seat_section(&self) -> &str {
        &self.seat_section
    }

    /// Move the pass to another race day
    pub fn set_race_day(&mut self, race_day: impl Into<String>) {
        self.race_day = race_day.into();
    }

    /// Move the pass to another seat section
    pub fn set_seat_section(&mut self, seat_section: impl Into<String>) {
        self.seat_section = seat_section.into();
    }
}

impl CalculatePrice for SingleRacePass {
    /// `(base_price + 10) * quantity`
    fn calculate_price(&self, quantity: u32) -> Result<Price, PricingError> {
        surcharged_price(&self.details.base_price(), RACE_DAY_SURCHARGE, 1, quantity)
    }
}
