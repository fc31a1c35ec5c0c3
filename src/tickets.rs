//! Tickets

use jiff::civil::Date;

use crate::{
    events::EventId,
    pricing::{Price, Priced},
    uuids::TypedUuid,
};

/// Ticket ID
pub type TicketId = TypedUuid<Ticket>;

/// Default type name for tickets issued without one.
pub const DEFAULT_TYPE_NAME: &str = "Ticket";

/// Resolves the event whose seat a ticket occupies.
pub trait Admission {
    /// The event this admits to, if any.
    fn event(&self) -> Option<EventId>;
}

/// An issued admission, priced when it was booked.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    id: TicketId,
    type_name: String,
    price: Price,
    valid_from: Date,
    valid_until: Date,
    is_available: bool,
    event: Option<EventId>,
}

impl Ticket {
    /// Issue a new available ticket with no event attached.
    pub fn new(price: Price, valid_from: Date, valid_until: Date) -> Self {
        Self {
            id: TicketId::new(),
            type_name: DEFAULT_TYPE_NAME.to_string(),
            price,
            valid_from,
            valid_until,
            is_available: true,
            event: None,
        }
    }

    /// Rebuild a ticket from stored fields.
    pub fn from_parts(
        id: TicketId,
        type_name: impl Into<String>,
        price: Price,
        validity_period: (Date, Date),
        is_available: bool,
        event: Option<EventId>,
    ) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            price,
            valid_from: validity_period.0,
            valid_until: validity_period.1,
            is_available,
            event,
        }
    }

    /// Name the ticket after the ticket type it was priced from.
    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    /// Attach the event the ticket admits to.
    #[must_use]
    pub fn with_event(mut self, event: EventId) -> Self {
        self.event = Some(event);
        self
    }

    /// Ticket ID
    pub fn id(&self) -> TicketId {
        self.id
    }

    /// Name of the ticket type it was priced from
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// First and last day the ticket is valid
    pub fn validity_period(&self) -> (Date, Date) {
        (self.valid_from, self.valid_until)
    }

    /// Whether the ticket can still be bought
    pub fn is_available(&self) -> bool {
        self.is_available
    }

    /// Mark the ticket as available or sold.
    pub fn update_availability(&mut self, available: bool) {
        self.is_available = available;
    }

    /// Change the days the ticket is valid.
    pub fn set_validity_period(&mut self, valid_from: Date, valid_until: Date) {
        self.valid_from = valid_from;
        self.valid_until = valid_until;
    }

    /// One-line description of the ticket.
    pub fn display_details(&self) -> String {
        format!(
            "Ticket ID: {}, Price: {}, Validity: {} to {}, Available: {}",
            self.id,
            self.price,
            self.valid_from,
            self.valid_until,
            if self.is_available { "Yes" } else { "No" }
        )
    }
}

impl Priced for Ticket {
    fn price(&self) -> Price {
        self.price
    }
}

impl Admission for Ticket {
    fn event(&self) -> Option<EventId> {
        self.event
    }
}
