//! Orders
//!
//! An order owns the tickets bought in one purchase. It is created pending,
//! can be edited while pending, and is then either confirmed (committing one
//! seat per ticket) or cancelled. Neither outcome can be undone.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    errors::ErrorKind,
    events::{EventError, SeatDemand, SeatInventory},
    pricing::{Price, Priced, TotalPriceError, total_price},
    tickets::{Admission, Ticket},
    users::UserId,
    uuids::TypedUuid,
};

/// Order ID
pub type OrderId = TypedUuid<Order>;

/// Errors raised by the order lifecycle.
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    /// Status text other than `pending`, `confirmed` or `cancelled`.
    #[error("invalid order status: {0}")]
    InvalidStatus(String),

    /// The order can only be changed while pending.
    #[error("order is {0}, not pending")]
    NotPending(OrderStatus),

    /// Status change that is not part of the lifecycle.
    #[error("cannot move order from {from} to {to}")]
    IllegalTransition {
        /// Current status
        from: OrderStatus,

        /// Requested status
        to: OrderStatus,
    },

    /// Only confirmation can commit seats, so the status cannot simply be set.
    #[error("orders are confirmed through confirm, not set_status")]
    ConfirmThroughInventory,

    /// Confirming an order with no tickets.
    #[error("cannot process an empty order")]
    EmptyOrder,

    /// A ticket without an event has no seat to consume.
    #[error("ticket at position {0} is not associated with an event")]
    MissingEvent(usize),

    /// A ticket priced in another currency.
    #[error("currency mismatch: order is in {expected}, ticket is in {found}")]
    CurrencyMismatch {
        /// Order currency
        expected: String,

        /// Ticket currency
        found: String,
    },

    /// Seats could not be consumed.
    #[error(transparent)]
    Seats(#[from] EventError),

    /// Totalling ticket prices failed.
    #[error(transparent)]
    Total(#[from] TotalPriceError),
}

impl OrderError {
    /// Category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::InvalidStatus(_) | OrderError::CurrencyMismatch { .. } => {
                ErrorKind::Validation
            }
            OrderError::NotPending(_)
            | OrderError::IllegalTransition { .. }
            | OrderError::ConfirmThroughInventory
            | OrderError::EmptyOrder
            | OrderError::MissingEvent(_) => ErrorKind::State,
            OrderError::Seats(error) => error.kind(),
            OrderError::Total(error) => error.kind(),
        }
    }
}

/// Where an order is in its lifecycle.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Being assembled
    #[default]
    Pending,

    /// Seats committed
    Confirmed,

    /// Abandoned before confirmation
    Cancelled,
}

impl OrderStatus {
    /// Lowercase name, as stored and displayed.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(OrderError::InvalidStatus(other.to_string())),
        }
    }
}

/// Tickets bought together by one purchaser.
#[derive(Debug, Clone, PartialEq)]
pub struct Order<T = Ticket> {
    id: OrderId,
    order_date: Date,
    status: OrderStatus,
    tickets: Vec<T>,
    user: Option<UserId>,
    currency: &'static Currency,
}

impl<T: Priced> Order<T> {
    /// Create an empty pending order.
    pub fn new(order_date: Date, currency: &'static Currency) -> Self {
        Self {
            id: OrderId::new(),
            order_date,
            status: OrderStatus::Pending,
            tickets: Vec::new(),
            user: None,
            currency,
        }
    }

    /// Rebuild an order from stored fields, bypassing the lifecycle checks.
    pub fn from_parts(
        id: OrderId,
        order_date: Date,
        status: OrderStatus,
        tickets: Vec<T>,
        user: Option<UserId>,
        currency: &'static Currency,
    ) -> Self {
        Self {
            id,
            order_date,
            status,
            tickets,
            user,
            currency,
        }
    }

    /// Record who placed the order.
    #[must_use]
    pub fn with_user(mut self, user: UserId) -> Self {
        self.user = Some(user);
        self
    }

    /// Order ID
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Day the order was placed
    pub fn order_date(&self) -> Date {
        self.order_date
    }

    /// Current status
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Tickets in the order
    pub fn tickets(&self) -> &[T] {
        &self.tickets
    }

    /// Who placed the order
    pub fn user(&self) -> Option<UserId> {
        self.user
    }

    /// Currency the order is totalled in
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of tickets
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Whether the order has no tickets
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Sum of the ticket prices; zero for an empty order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Total`] if the sum cannot be computed.
    pub fn total(&self) -> Result<Price, OrderError> {
        Ok(total_price(self.currency, &self.tickets)?)
    }

    /// Add a ticket to a pending order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotPending`] once the order is confirmed or
    /// cancelled, and [`OrderError::CurrencyMismatch`] for a ticket priced in
    /// another currency.
    pub fn add_ticket(&mut self, ticket: T) -> Result<(), OrderError> {
        self.ensure_pending()?;

        let currency = ticket.price().currency();

        if currency != self.currency {
            return Err(OrderError::CurrencyMismatch {
                expected: self.currency.iso_alpha_code.to_string(),
                found: currency.iso_alpha_code.to_string(),
            });
        }

        self.tickets.push(ticket);

        Ok(())
    }

    /// Remove a ticket from a pending order, returning whether it was present.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotPending`] once the order is confirmed or cancelled.
    pub fn remove_ticket(&mut self, ticket: &T) -> Result<bool, OrderError>
    where
        T: PartialEq,
    {
        self.ensure_pending()?;

        let Some(position) = self.tickets.iter().position(|t| t == ticket) else {
            return Ok(false);
        };

        self.tickets.remove(position);

        Ok(true)
    }

    /// Change the status.
    ///
    /// Only `pending -> cancelled` (and keeping the current status) is allowed;
    /// confirmation has to go through [`Order::confirm`].
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::ConfirmThroughInventory`] for [`OrderStatus::Confirmed`]
    /// and [`OrderError::IllegalTransition`] for any move out of a final status.
    pub fn set_status(&mut self, status: OrderStatus) -> Result<(), OrderError> {
        if status == self.status {
            return Ok(());
        }

        match (self.status, status) {
            (OrderStatus::Pending, OrderStatus::Confirmed) => {
                Err(OrderError::ConfirmThroughInventory)
            }
            (OrderStatus::Pending, OrderStatus::Cancelled) => {
                self.status = status;

                info!(order = %self.id, "order cancelled");

                Ok(())
            }
            (from, to) => Err(OrderError::IllegalTransition { from, to }),
        }
    }

    /// Parse and apply a status name.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidStatus`] for an unknown name, otherwise as
    /// [`Order::set_status`].
    pub fn set_status_str(&mut self, status: &str) -> Result<(), OrderError> {
        self.set_status(status.parse()?)
    }

    /// Cancel a pending order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::IllegalTransition`] if the order is not pending.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        match self.status {
            OrderStatus::Pending => self.set_status(OrderStatus::Cancelled),
            from => Err(OrderError::IllegalTransition {
                from,
                to: OrderStatus::Cancelled,
            }),
        }
    }

    /// Seats needed per event, one per ticket.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::EmptyOrder`] if the order has no tickets and
    /// [`OrderError::MissingEvent`] if a ticket has no event.
    pub fn seat_demand(&self) -> Result<SeatDemand, OrderError>
    where
        T: Admission,
    {
        if self.tickets.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let mut demand = SeatDemand::new();

        for (position, ticket) in self.tickets.iter().enumerate() {
            let event = ticket.event().ok_or(OrderError::MissingEvent(position))?;
            let seats = demand.entry(event).or_insert(0);

            *seats = seats.saturating_add(1);
        }

        Ok(demand)
    }

    /// Commit one seat per ticket and mark the order confirmed.
    ///
    /// Seats are taken for every ticket or for none of them.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotPending`] unless the order is pending,
    /// [`OrderError::EmptyOrder`] if it has no tickets,
    /// [`OrderError::MissingEvent`] if a ticket has no event, and
    /// [`OrderError::Seats`] if the inventory cannot supply the seats.
    pub fn confirm(&mut self, inventory: &impl SeatInventory) -> Result<(), OrderError>
    where
        T: Admission,
    {
        self.ensure_pending()?;

        let demand = self.seat_demand()?;

        debug!(order = %self.id, events = demand.len(), "consuming seats");

        inventory.consume_seats(&demand)?;

        self.status = OrderStatus::Confirmed;

        info!(order = %self.id, tickets = self.tickets.len(), "order confirmed");

        Ok(())
    }

    fn ensure_pending(&self) -> Result<(), OrderError> {
        if self.status != OrderStatus::Pending {
            return Err(OrderError::NotPending(self.status));
        }

        Ok(())
    }
}

impl Order<Ticket> {
    /// Type name of the first ticket, or `Unknown` for an empty order.
    pub fn ticket_type(&self) -> &str {
        self.tickets.first().map_or("Unknown", Ticket::type_name)
    }

    /// One-line listing: `<id> | <type> x<n> = <total>`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Total`] if the total cannot be computed.
    pub fn summary(&self) -> Result<String, OrderError> {
        Ok(format!(
            "{} | {} x{} = {}",
            self.id,
            self.ticket_type(),
            self.tickets.len(),
            self.total()?
        ))
    }
}
