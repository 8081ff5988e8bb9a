//! Per-record editing session.
//!
//! An [`UpdateSession`] owns the record being edited and the user's local
//! edits, and moves through the update states:
//!
//! ```text
//! Viewing -> EditingPending -> Submitting -> Applied
//!                 ^                 |
//!                 +----- Failed <---+
//! ```
//!
//! The diff is computed when the session enters `Submitting`, never earlier.
//! Deletion is tracked separately by [`DeleteFlow`](super::DeleteFlow).

use chrono::{DateTime, Utc};

use super::{BookDiff, BookEdit, BookPatch, BookRecord, Error, Rating, build_diff};

/// Observable state of an [`UpdateSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateState {
    /// Showing the stored record with no local edits.
    Viewing,
    /// At least one local field has been touched.
    EditingPending,
    /// A partial update is in flight.
    Submitting,
    /// The store accepted the update. Terminal.
    Applied,
    /// The store rejected the update; see [`UpdateSession::last_error`].
    Failed,
}

/// Errors raised by invalid session transitions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpdateSessionError {
    /// The requested action is not allowed in the current state.
    #[error("cannot {action} while the update session is {state:?}")]
    InvalidTransition {
        /// State the session was in.
        state: UpdateState,
        /// Rejected action.
        action: &'static str,
    },
    /// The record already has a start timestamp.
    #[error("book was already started")]
    AlreadyStarted,
    /// The record already has a finish timestamp.
    #[error("book was already finished")]
    AlreadyFinished,
    /// The store call failed; the session is now [`UpdateState::Failed`].
    #[error(transparent)]
    Store(#[from] Error),
}

/// Local editing state for one record.
#[derive(Debug, Clone)]
pub struct UpdateSession {
    record: BookRecord,
    edit: BookEdit,
    state: UpdateState,
    pending: Option<BookPatch>,
    last_error: Option<Error>,
}

impl UpdateSession {
    /// Open a session showing `record`.
    pub fn new(record: BookRecord) -> Self {
        let edit = BookEdit::unchanged(&record);
        Self {
            record,
            edit,
            state: UpdateState::Viewing,
            pending: None,
            last_error: None,
        }
    }

    /// Record as last read from (or written to) the store.
    pub fn record(&self) -> &BookRecord {
        &self.record
    }

    /// Current local edits.
    pub fn edit(&self) -> &BookEdit {
        &self.edit
    }

    /// Current state.
    pub fn state(&self) -> UpdateState {
        self.state
    }

    /// Failure from the last submission, while the session is `Failed`.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Replace the notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) -> Result<(), UpdateSessionError> {
        self.ensure_editable("edit notes")?;
        self.edit.notes = notes.into();
        self.touch();
        Ok(())
    }

    /// Replace the rating.
    pub fn set_rating(&mut self, rating: Rating) -> Result<(), UpdateSessionError> {
        self.ensure_editable("edit rating")?;
        self.edit.rating = rating;
        self.touch();
        Ok(())
    }

    /// Ask to mark the book as started when the update is submitted.
    pub fn start_reading(&mut self) -> Result<(), UpdateSessionError> {
        self.ensure_editable("start reading")?;
        if self.record.started_reading.is_some() {
            return Err(UpdateSessionError::AlreadyStarted);
        }
        self.edit.start_reading = true;
        self.touch();
        Ok(())
    }

    /// Ask to mark the book as finished when the update is submitted.
    pub fn finish_reading(&mut self) -> Result<(), UpdateSessionError> {
        self.ensure_editable("finish reading")?;
        if self.record.finished_reading.is_some() {
            return Err(UpdateSessionError::AlreadyFinished);
        }
        self.edit.finish_reading = true;
        self.touch();
        Ok(())
    }

    /// Compute the diff and enter `Submitting`.
    ///
    /// Returns `None` and settles back in `Viewing` when the edits change
    /// nothing; no store call must follow in that case.
    pub fn begin_submit(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<Option<BookDiff>, UpdateSessionError> {
        if !matches!(
            self.state,
            UpdateState::Viewing | UpdateState::EditingPending | UpdateState::Failed
        ) {
            return Err(self.invalid("submit"));
        }

        let diff = build_diff(&self.record, &self.edit, now);
        if !diff.has_changes() {
            self.reset_edit();
            self.state = UpdateState::Viewing;
            return Ok(None);
        }

        self.pending = Some(diff.fields_changed().clone());
        self.last_error = None;
        self.state = UpdateState::Submitting;
        Ok(Some(diff))
    }

    /// Record the outcome of the store call started by [`Self::begin_submit`].
    ///
    /// On success the written fields are merged into the local record and the
    /// edits are discarded. On failure the edits are kept for a retry, unless
    /// the record no longer exists.
    pub fn complete_submit(&mut self, outcome: Result<(), Error>) -> Result<(), UpdateSessionError> {
        if self.state != UpdateState::Submitting {
            return Err(self.invalid("complete a submission"));
        }
        let pending = self.pending.take();

        match outcome {
            Ok(()) => {
                if let Some(patch) = pending {
                    patch.apply_to(&mut self.record);
                }
                self.reset_edit();
                self.state = UpdateState::Applied;
                Ok(())
            }
            Err(error) => {
                if error.discards_local_edits() {
                    self.reset_edit();
                }
                self.last_error = Some(error.clone());
                self.state = UpdateState::Failed;
                Err(UpdateSessionError::Store(error))
            }
        }
    }

    fn ensure_editable(&self, action: &'static str) -> Result<(), UpdateSessionError> {
        match self.state {
            UpdateState::Viewing | UpdateState::EditingPending | UpdateState::Failed => Ok(()),
            UpdateState::Submitting | UpdateState::Applied => Err(self.invalid(action)),
        }
    }

    fn touch(&mut self) {
        self.state = UpdateState::EditingPending;
    }

    fn reset_edit(&mut self) {
        self.edit = BookEdit::unchanged(&self.record);
    }

    fn invalid(&self, action: &'static str) -> UpdateSessionError {
        UpdateSessionError::InvalidTransition {
            state: self.state,
            action,
        }
    }
}

#[cfg(test)]
#[path = "update_session_tests.rs"]
mod tests;
