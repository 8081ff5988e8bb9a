//! Book update service.
//!
//! Writes computed diffs to the store as single partial updates and executes
//! confirmed deletions. Failures are surfaced to the caller and never retried.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::BookStore;
use crate::domain::reading_list_service::map_store_error;
use crate::domain::{
    BookDiff, BookId, BookPatch, DeleteConfirmation, DeleteFlow, DeleteFlowError, Error,
    UpdateSession, UpdateSessionError,
};

/// What an update call did.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The diff was empty; the store was not called.
    NoChanges,
    /// The store accepted this patch.
    Applied(BookPatch),
}

impl UpdateOutcome {
    /// Whether a store write happened.
    pub fn was_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Service applying updates and deletions to stored records.
#[derive(Clone)]
pub struct BookUpdateService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> BookUpdateService<S>
where
    S: BookStore,
{
    /// Create a service over `store`, reading "now" from `clock`.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Issue one partial update carrying only the changed fields.
    ///
    /// An empty diff makes no store call.
    pub async fn apply(&self, id: &BookId, diff: &BookDiff) -> Result<UpdateOutcome, Error> {
        if !diff.has_changes() {
            debug!(book_id = %id, "no changes to apply; skipping store call");
            return Ok(UpdateOutcome::NoChanges);
        }
        let patch = diff.fields_changed();
        self.write(id, patch).await?;
        Ok(UpdateOutcome::Applied(patch.clone()))
    }

    /// Submit the edits held by `session` and record the outcome on it.
    ///
    /// Timestamps for newly started or finished books come from the clock.
    pub async fn submit(
        &self,
        session: &mut UpdateSession,
    ) -> Result<UpdateOutcome, UpdateSessionError> {
        let book_id = session.record().id.clone();
        let Some(diff) = session.begin_submit(self.clock.utc())? else {
            debug!(book_id = %book_id, "no changes to submit; skipping store call");
            return Ok(UpdateOutcome::NoChanges);
        };

        if diff.fields_changed().finishes_unstarted(session.record()) {
            warn!(book_id = %book_id, "finishing a book that was never started");
        }

        let outcome = self.write(&book_id, diff.fields_changed()).await;
        session.complete_submit(outcome)?;
        Ok(UpdateOutcome::Applied(diff.into_patch()))
    }

    /// Delete the confirmed record. Irreversible.
    pub async fn delete(&self, confirmation: DeleteConfirmation) -> Result<(), Error> {
        let id = confirmation.book_id();
        self.store.delete(id).await.map_err(|err| {
            warn!(book_id = %id, error = %err, "book deletion failed");
            map_store_error(err)
        })?;
        info!(book_id = %id, "book deleted");
        Ok(())
    }

    /// Confirm a pending delete request and execute it.
    ///
    /// Fails without calling the store unless `flow` is awaiting confirmation.
    pub async fn confirm_delete(&self, flow: &mut DeleteFlow) -> Result<(), DeleteFlowError> {
        let confirmation = flow.confirm()?;
        let outcome = self.delete(confirmation).await;
        flow.complete(outcome)
    }

    async fn write(&self, id: &BookId, patch: &BookPatch) -> Result<(), Error> {
        let fields = patch.field_names();
        self.store.update_fields(id, patch).await.map_err(|err| {
            warn!(book_id = %id, error = %err, "book update failed");
            map_store_error(err)
        })?;
        info!(book_id = %id, fields = ?fields, "book updated");
        Ok(())
    }
}

#[cfg(test)]
#[path = "book_update_service_tests.rs"]
mod tests;
