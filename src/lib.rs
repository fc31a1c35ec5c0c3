//! Grandstand
//!
//! Grandstand books Grand Prix tickets: it prices ticket types, keeps seat
//! inventory per event, assembles and confirms orders, tracks payments and
//! tallies sales into reports.

pub mod booking;
pub mod catalog;
pub mod config;
pub mod discounts;
pub mod errors;
pub mod events;
pub mod observability;
pub mod orders;
pub mod payments;
pub mod prelude;
pub mod pricing;
pub mod reports;
pub mod repository;
pub mod ticket_types;
pub mod tickets;
pub mod users;
pub mod uuids;
