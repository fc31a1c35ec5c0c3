//! Stored Records
//!
//! Serialisable forms of orders and users. Prices are kept as `AMOUNT CODE`
//! strings so files stay readable.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    events::EventId,
    orders::{Order, OrderId},
    pricing::{Priced, currency_from_code, format_price, price_from_str},
    repository::RepositoryError,
    tickets::{Admission, Ticket, TicketId},
    users::{User, UserId},
};

/// One entry of a stored collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoredRecord {
    /// An order with its tickets
    Order(OrderRecord),

    /// A user profile
    User(UserRecord),
}

/// Stored order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order ID
    pub id: Uuid,

    /// Day the order was placed
    pub order_date: Date,

    /// `pending`, `confirmed` or `cancelled`
    pub status: String,

    /// ISO currency code
    pub currency: String,

    /// Purchaser
    #[serde(default)]
    pub user: Option<Uuid>,

    /// Tickets in the order
    #[serde(default)]
    pub tickets: Vec<TicketRecord>,
}

/// Stored ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    /// Ticket ID
    pub id: Uuid,

    /// Ticket type name
    pub type_name: String,

    /// Price (e.g., "130.00 USD")
    pub price: String,

    /// First valid day
    pub valid_from: Date,

    /// Last valid day
    pub valid_until: Date,

    /// Whether the ticket is still on sale
    pub is_available: bool,

    /// Event the ticket admits to
    #[serde(default)]
    pub event: Option<Uuid>,
}

/// Stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User ID
    pub id: Uuid,

    /// Login name
    pub username: String,

    /// Full name
    pub full_name: String,

    /// Email address
    pub email: String,

    /// Phone number
    #[serde(default)]
    pub phone_number: String,

    /// Postal address
    #[serde(default)]
    pub address: String,

    /// Orders placed, oldest first
    #[serde(default)]
    pub purchase_history: Vec<Uuid>,
}

impl From<&Ticket> for TicketRecord {
    fn from(ticket: &Ticket) -> Self {
        let (valid_from, valid_until) = ticket.validity_period();

        Self {
            id: ticket.id().into_uuid(),
            type_name: ticket.type_name().to_string(),
            price: format_price(&ticket.price()),
            valid_from,
            valid_until,
            is_available: ticket.is_available(),
            event: ticket.event().map(EventId::into_uuid),
        }
    }
}

impl TryFrom<TicketRecord> for Ticket {
    type Error = RepositoryError;

    fn try_from(record: TicketRecord) -> Result<Self, Self::Error> {
        Ok(Ticket::from_parts(
            TicketId::from_uuid(record.id),
            record.type_name,
            price_from_str(&record.price)?,
            (record.valid_from, record.valid_until),
            record.is_available,
            record.event.map(EventId::from_uuid),
        ))
    }
}

impl From<&Order> for OrderRecord {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().into_uuid(),
            order_date: order.order_date(),
            status: order.status().to_string(),
            currency: order.currency().iso_alpha_code.to_string(),
            user: order.user().map(UserId::into_uuid),
            tickets: order.tickets().iter().map(TicketRecord::from).collect(),
        }
    }
}

impl TryFrom<OrderRecord> for Order {
    type Error = RepositoryError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        let tickets = record
            .tickets
            .into_iter()
            .map(Ticket::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Order::from_parts(
            OrderId::from_uuid(record.id),
            record.order_date,
            record.status.parse()?,
            tickets,
            record.user.map(UserId::from_uuid),
            currency_from_code(&record.currency)?,
        ))
    }
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().into_uuid(),
            username: user.username().to_string(),
            full_name: user.full_name().to_string(),
            email: user.email().to_string(),
            phone_number: user.phone_number().to_string(),
            address: user.address().to_string(),
            purchase_history: user
                .purchase_history()
                .iter()
                .copied()
                .map(OrderId::into_uuid)
                .collect(),
        }
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        let mut user = User::new(
            record.username,
            record.full_name,
            record.email,
            record.phone_number,
            record.address,
        )
        .with_id(UserId::from_uuid(record.id));

        for order in record.purchase_history {
            user.add_purchase(OrderId::from_uuid(order));
        }

        user
    }
}
