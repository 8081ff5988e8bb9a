//! In-process book store.
//!
//! Keeps records in insertion order behind a mutex and assigns random UUID
//! document ids on creation. Updates merge only the named fields, matching the
//! partial-update semantics of the remote document store.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{BookStore, BookStoreError};
use crate::domain::{BookId, BookPatch, BookRecord, NewBookRecord, UserId};

/// Book store held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    records: Mutex<Vec<BookRecord>>,
}

impl InMemoryBookStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`, kept in the given order.
    pub fn with_records(records: Vec<BookRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Copy of every stored record, regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns [`BookStoreError::Unavailable`] when the lock is poisoned.
    pub fn snapshot(&self) -> Result<Vec<BookRecord>, BookStoreError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<BookRecord>>, BookStoreError> {
        self.records
            .lock()
            .map_err(|_| BookStoreError::unavailable("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn create(&self, record: &NewBookRecord) -> Result<BookId, BookStoreError> {
        let id = BookId::new(Uuid::new_v4().to_string())
            .map_err(|err| BookStoreError::unavailable(err.to_string()))?;
        self.lock()?.push(record.clone().into_record(id.clone()));
        Ok(id)
    }

    async fn query_by_user(&self, user_id: &UserId) -> Result<Vec<BookRecord>, BookStoreError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|record| record.is_owned_by(user_id))
            .cloned()
            .collect())
    }

    async fn update_fields(&self, id: &BookId, patch: &BookPatch) -> Result<(), BookStoreError> {
        let mut records = self.lock()?;
        let record = records
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or_else(|| BookStoreError::not_found(id.as_ref()))?;
        patch.apply_to(record);
        Ok(())
    }

    async fn delete(&self, id: &BookId) -> Result<(), BookStoreError> {
        let mut records = self.lock()?;
        let index = records
            .iter()
            .position(|record| &record.id == id)
            .ok_or_else(|| BookStoreError::not_found(id.as_ref()))?;
        records.remove(index);
        Ok(())
    }
}
