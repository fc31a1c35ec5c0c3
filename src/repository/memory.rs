//! In-memory Repository

use parking_lot::Mutex;

use crate::repository::{Entity, Repository, RepositoryError};

/// Keeps values in memory, in insertion order.
#[derive(Debug)]
pub struct InMemoryRepository<E> {
    entities: Mutex<Vec<E>>,
}

impl<E> InMemoryRepository<E> {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            entities: Mutex::new(Vec::new()),
        }
    }
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    fn get(&self, id: E::Id) -> Result<Option<E>, RepositoryError> {
        Ok(self
            .entities
            .lock()
            .iter()
            .find(|entity| entity.id() == id)
            .cloned())
    }

    fn put(&self, entity: E) -> Result<(), RepositoryError> {
        let mut entities = self.entities.lock();

        match entities.iter_mut().find(|existing| existing.id() == entity.id()) {
            Some(existing) => *existing = entity,
            None => entities.push(entity),
        }

        Ok(())
    }

    fn delete(&self, id: E::Id) -> Result<bool, RepositoryError> {
        let mut entities = self.entities.lock();
        let before = entities.len();

        entities.retain(|entity| entity.id() != id);

        Ok(entities.len() != before)
    }

    fn list(&self) -> Result<Vec<E>, RepositoryError> {
        Ok(self.entities.lock().clone())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::users::User;

    use super::*;

    fn user(name: &str) -> User {
        User::new(name, name, format!("{name}@example.com"), "", "")
    }

    #[test]
    fn put_get_delete() -> TestResult {
        let repository = InMemoryRepository::new();
        let user = user("nigel");
        let id = user.id();

        repository.put(user.clone())?;

        assert_eq!(repository.get(id)?, Some(user));
        assert!(repository.delete(id)?);
        assert!(!repository.delete(id)?);
        assert_eq!(Repository::<User>::get(&repository, id)?, None);

        Ok(())
    }

    #[test]
    fn put_replaces_in_place() -> TestResult {
        let repository = InMemoryRepository::new();
        let mut first = user("damon");
        let second = user("mika");

        repository.put(first.clone())?;
        repository.put(second.clone())?;

        first.set_username("dh");
        repository.put(first.clone())?;

        assert_eq!(repository.list()?, vec![first, second]);

        Ok(())
    }
}
