//! Two-phase deletion of a record.
//!
//! ```text
//! Idle -> ConfirmPending -> Deleting -> Removed
//!  ^           |               |
//!  +-- cancel -+               +-> Failed -> ConfirmPending (retry)
//! ```
//!
//! A store delete needs a [`DeleteConfirmation`], and the only way to obtain
//! one is [`DeleteFlow::confirm`] from `ConfirmPending`. A single step can
//! therefore never delete a record.

use super::{BookId, Error};

/// Observable state of a [`DeleteFlow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteState {
    /// No deletion requested.
    Idle,
    /// The user asked to delete and must confirm or cancel.
    ConfirmPending,
    /// The store delete is in flight.
    Deleting,
    /// The record is gone. Terminal.
    Removed,
    /// The store delete failed; see [`DeleteFlow::last_error`].
    Failed,
}

/// Errors raised by the delete flow.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeleteFlowError {
    /// The requested action is not allowed in the current state.
    #[error("cannot {action} while the delete flow is {state:?}")]
    InvalidTransition {
        /// State the flow was in.
        state: DeleteState,
        /// Rejected action.
        action: &'static str,
    },
    /// The store call failed; the flow is now [`DeleteState::Failed`].
    #[error(transparent)]
    Store(#[from] Error),
}

/// Proof that the user confirmed deleting one record.
///
/// Deliberately neither `Clone` nor constructible outside this module.
#[derive(Debug, PartialEq, Eq)]
pub struct DeleteConfirmation {
    book_id: BookId,
}

impl DeleteConfirmation {
    /// Record the user confirmed deleting.
    pub fn book_id(&self) -> &BookId {
        &self.book_id
    }
}

/// Deletion state for one record.
#[derive(Debug, Clone)]
pub struct DeleteFlow {
    book_id: BookId,
    state: DeleteState,
    last_error: Option<Error>,
}

impl DeleteFlow {
    /// Start an idle flow for `book_id`.
    pub fn new(book_id: BookId) -> Self {
        Self {
            book_id,
            state: DeleteState::Idle,
            last_error: None,
        }
    }

    /// Record targeted by this flow.
    pub fn book_id(&self) -> &BookId {
        &self.book_id
    }

    /// Current state.
    pub fn state(&self) -> DeleteState {
        self.state
    }

    /// Failure from the last attempt, while the flow is `Failed`.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Ask for confirmation.
    pub fn request(&mut self) -> Result<(), DeleteFlowError> {
        match self.state {
            DeleteState::Idle | DeleteState::Failed => {
                self.state = DeleteState::ConfirmPending;
                Ok(())
            }
            _ => Err(self.invalid("request deletion")),
        }
    }

    /// Dismiss the confirmation prompt.
    pub fn cancel(&mut self) -> Result<(), DeleteFlowError> {
        if self.state != DeleteState::ConfirmPending {
            return Err(self.invalid("cancel"));
        }
        self.state = DeleteState::Idle;
        Ok(())
    }

    /// Confirm the pending request and enter `Deleting`.
    pub fn confirm(&mut self) -> Result<DeleteConfirmation, DeleteFlowError> {
        if self.state != DeleteState::ConfirmPending {
            return Err(self.invalid("confirm deletion"));
        }
        self.last_error = None;
        self.state = DeleteState::Deleting;
        Ok(DeleteConfirmation {
            book_id: self.book_id.clone(),
        })
    }

    /// Record the outcome of the store delete.
    pub fn complete(&mut self, outcome: Result<(), Error>) -> Result<(), DeleteFlowError> {
        if self.state != DeleteState::Deleting {
            return Err(self.invalid("complete deletion"));
        }
        match outcome {
            Ok(()) => {
                self.state = DeleteState::Removed;
                Ok(())
            }
            Err(error) => {
                self.last_error = Some(error.clone());
                self.state = DeleteState::Failed;
                Err(DeleteFlowError::Store(error))
            }
        }
    }

    fn invalid(&self, action: &'static str) -> DeleteFlowError {
        DeleteFlowError::InvalidTransition {
            state: self.state,
            action,
        }
    }
}
