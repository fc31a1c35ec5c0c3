//! Collection Stores
//!
//! A collection store only knows how to load and save the whole collection.
//! [`StoredRepository`] layers per-entity access on top of that, loading
//! everything, changing it and saving everything back under one lock.

use std::{
    fs,
    io::ErrorKind as IoErrorKind,
    path::{Path, PathBuf},
};

use parking_lot::Mutex;
use tracing::debug;

use crate::{
    orders::Order,
    repository::{
        Entity, Repository, RepositoryError,
        records::{OrderRecord, StoredRecord, UserRecord},
    },
    users::User,
};

/// Whole-collection persistence.
pub trait CollectionStore {
    /// Load every stored record.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the collection cannot be read.
    fn load(&self) -> Result<Vec<StoredRecord>, RepositoryError>;

    /// Replace the stored collection with `records`.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the collection cannot be written.
    fn save(&self, records: &[StoredRecord]) -> Result<(), RepositoryError>;
}

/// Stores the collection as one YAML file. A missing file is an empty collection.
#[derive(Debug, Clone)]
pub struct YamlFileStore {
    path: PathBuf,
}

impl YamlFileStore {
    /// Store the collection at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CollectionStore for YamlFileStore {
    fn load(&self) -> Result<Vec<StoredRecord>, RepositoryError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<StoredRecord> = serde_norway::from_str(&contents)?;

        debug!(path = %self.path.display(), records = records.len(), "loaded collection");

        Ok(records)
    }

    fn save(&self, records: &[StoredRecord]) -> Result<(), RepositoryError> {
        fs::write(&self.path, serde_norway::to_string(records)?)?;

        debug!(path = %self.path.display(), records = records.len(), "saved collection");

        Ok(())
    }
}

/// An entity kept in a mixed collection of [`StoredRecord`]s.
pub trait StoredEntity: Entity + Sized {
    /// Whether `record` holds the entity with `id`.
    fn is_record_of(record: &StoredRecord, id: Self::Id) -> bool;

    /// Read the entity back, or `None` if `record` holds something else.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the record holds invalid data.
    fn from_record(record: &StoredRecord) -> Option<Result<Self, RepositoryError>>;

    /// Record form of the entity.
    fn to_record(&self) -> StoredRecord;
}

impl StoredEntity for Order {
    fn is_record_of(record: &StoredRecord, id: Self::Id) -> bool {
        matches!(record, StoredRecord::Order(order) if order.id == id.into_uuid())
    }

    fn from_record(record: &StoredRecord) -> Option<Result<Self, RepositoryError>> {
        match record {
            StoredRecord::Order(order) => Some(Order::try_from(order.clone())),
            StoredRecord::User(_) => None,
        }
    }

    fn to_record(&self) -> StoredRecord {
        StoredRecord::Order(OrderRecord::from(self))
    }
}

impl StoredEntity for User {
    fn is_record_of(record: &StoredRecord, id: Self::Id) -> bool {
        matches!(record, StoredRecord::User(user) if user.id == id.into_uuid())
    }

    fn from_record(record: &StoredRecord) -> Option<Result<Self, RepositoryError>> {
        match record {
            StoredRecord::User(user) => Some(Ok(User::from(user.clone()))),
            StoredRecord::Order(_) => None,
        }
    }

    fn to_record(&self) -> StoredRecord {
        StoredRecord::User(UserRecord::from(self))
    }
}

/// Per-entity repository over a whole-collection store.
#[derive(Debug)]
pub struct StoredRepository<S> {
    store: S,
    lock: Mutex<()>,
}

impl<S: CollectionStore> StoredRepository<S> {
    /// Wrap `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    fn modify<T>(
        &self,
        f: impl FnOnce(&mut Vec<StoredRecord>) -> T,
    ) -> Result<T, RepositoryError> {
        let _guard = self.lock.lock();
        let mut records = self.store.load()?;

        let result = f(&mut records);

        self.store.save(&records)?;

        Ok(result)
    }
}

impl<S: CollectionStore, E: StoredEntity> Repository<E> for StoredRepository<S> {
    fn get(&self, id: E::Id) -> Result<Option<E>, RepositoryError> {
        let _guard = self.lock.lock();

        self.store
            .load()?
            .iter()
            .find(|record| E::is_record_of(record, id))
            .and_then(E::from_record)
            .transpose()
    }

    fn put(&self, entity: E) -> Result<(), RepositoryError> {
        let id = entity.id();
        let record = entity.to_record();

        self.modify(|records| {
            match records.iter_mut().find(|existing| E::is_record_of(existing, id)) {
                Some(existing) => *existing = record,
                None => records.push(record),
            }
        })
    }

    fn delete(&self, id: E::Id) -> Result<bool, RepositoryError> {
        self.modify(|records| {
            let before = records.len();

            records.retain(|record| !E::is_record_of(record, id));

            records.len() != before
        })
    }

    fn list(&self) -> Result<Vec<E>, RepositoryError> {
        let _guard = self.lock.lock();

        self.store
            .load()?
            .iter()
            .filter_map(E::from_record)
            .collect()
    }
}
