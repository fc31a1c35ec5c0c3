//! Grandstand prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    booking::{Booking, BookingDesk, BookingError, BookingRequest, render_orders},
    catalog::{Catalog, CatalogError, GROUP, RACE_PASS, SEASON, WEEKEND},
    config::BookingConfig,
    discounts::{DiscountError, DiscountPercentage},
    errors::ErrorKind,
    events::{Event, EventError, EventId, EventRegistry, SeatDemand, SeatInventory},
    orders::{Order, OrderError, OrderId, OrderStatus},
    payments::{Payment, PaymentError, PaymentId, PaymentMethod, PaymentStatus},
    pricing::{Price, Priced, total_price},
    reports::{DirectorySink, ReportError, ReportSink, SalesReport, SalesSummary},
    repository::{
        CollectionStore, Entity, InMemoryRepository, Repository, RepositoryError,
        StoredRepository, YamlFileStore,
    },
    ticket_types::{
        CalculatePrice, GroupDiscount, PricingError, SeasonMembership, SingleRacePass,
        TicketType, TicketTypeDetails, WeekendPackage,
    },
    tickets::{Admission, Ticket, TicketId},
    users::{ProfileUpdate, User, UserId},
};
