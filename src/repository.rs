//! Repository
//!
//! Storage for orders and users. The booking desk talks to a [`Repository`];
//! the file-backed implementation keeps the "load everything, change it, save
//! everything" behaviour behind per-entity calls.

use std::{fmt::Display, hash::Hash};

use thiserror::Error;

use crate::{
    errors::ErrorKind,
    orders::{Order, OrderError, OrderId},
    pricing::PriceParseError,
    users::{User, UserId},
};

pub mod memory;
pub mod records;
pub mod store;

pub use memory::InMemoryRepository;
pub use records::{OrderRecord, StoredRecord, TicketRecord, UserRecord};
pub use store::{CollectionStore, StoredRepository, YamlFileStore};

/// Repository errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// IO error reading or writing the collection
    #[error("failed to access store: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialisation error
    #[error("failed to (de)serialise store: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A stored price could not be read back
    #[error("invalid stored price: {0}")]
    Price(#[from] PriceParseError),

    /// A stored order status could not be read back
    #[error("invalid stored order: {0}")]
    Order(#[from] OrderError),
}

impl RepositoryError {
    /// Category of the error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Storage
    }
}

/// Something stored under its own id.
pub trait Entity: Clone {
    /// Identifier type
    type Id: Copy + Eq + Hash + Display;

    /// Identifier of this value
    fn id(&self) -> Self::Id;
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        Order::id(self)
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        User::id(self)
    }
}

/// Per-entity storage.
///
/// Methods take `&self` so one repository can serve concurrent bookings;
/// implementations serialise writes internally.
pub trait Repository<E: Entity> {
    /// Look up a value by id.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the store cannot be read.
    fn get(&self, id: E::Id) -> Result<Option<E>, RepositoryError>;

    /// Insert or replace a value.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the store cannot be written.
    fn put(&self, entity: E) -> Result<(), RepositoryError>;

    /// Remove a value, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the store cannot be written.
    fn delete(&self, id: E::Id) -> Result<bool, RepositoryError>;

    /// Every stored value, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the store cannot be read.
    fn list(&self) -> Result<Vec<E>, RepositoryError>;
}
