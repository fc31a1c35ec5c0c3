//! Season Membership

use crate::{
    pricing::Price,
    ticket_types::{CalculatePrice, PricingError, TicketTypeDetails, surcharged_price},
};

/// Surcharge per perk, in major units.
const PER_PERK_SURCHARGE: i64 = 15;

/// Membership covering an entire racing season.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonMembership {
    details: TicketTypeDetails,
    season: String,
    membership_level: String,
    perks: Vec<String>,
}

impl SeasonMembership {
    /// Create a new season membership.
    pub fn new(
        details: TicketTypeDetails,
        season: impl Into<String>,
        membership_level: impl Into<String>,
        perks: Vec<String>,
    ) -> Self {
        Self {
            details,
            season: season.into(),
            membership_level: membership_level.into(),
            perks,
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

    /// Season covered, e.g. "2025"
    pub fn season(&self) -> &str {
        &self.season
    }

    /// Membership tier, e.g. "Gold"
    pub fn membership_level(&self) -> &str {
        &self.membership_level
    }

    /// Extra benefits included
    pub fn perks(&self) -> &[String] {
        &self.perks
    }
}

impl CalculatePrice for SeasonMembership {
    /// `(base_price + 15 * perks) * quantity`
    fn calculate_price(&self, quantity: u32) -> Result<Price, PricingError> {
        surcharged_price(
            &self.details.base_price(),
            PER_PERK_SURCHARGE,
            self.perks.len(),
            quantity,
        )
    }
}
