//! Port for the remote document store holding book records.
//!
//! The store is the single arbiter of writes: there are no revision tokens and
//! no conflict detection. Adapters surface failures and never retry.

use async_trait::async_trait;

use crate::domain::{BookId, BookPatch, BookRecord, NewBookRecord, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by book store adapters.
    pub enum BookStoreError {
        /// The store could not be reached or timed out.
        Unavailable { message: String } =>
            "book store unavailable: {message}",
        /// No record exists under the given id.
        NotFound { id: String } =>
            "book record {id} not found",
        /// The store refused the operation for the current principal.
        PermissionDenied { message: String } =>
            "book store denied the operation: {message}",
    }
}

/// Document collection of book records keyed by opaque id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Persist a new record and return the id the store assigned.
    async fn create(&self, record: &NewBookRecord) -> Result<BookId, BookStoreError>;

    /// All records owned by `user_id`, in no particular order.
    async fn query_by_user(&self, user_id: &UserId) -> Result<Vec<BookRecord>, BookStoreError>;

    /// Overwrite only the fields named by `patch`.
    async fn update_fields(&self, id: &BookId, patch: &BookPatch) -> Result<(), BookStoreError>;

    /// Remove the record. Irreversible.
    async fn delete(&self, id: &BookId) -> Result<(), BookStoreError>;
}
