//! Reading-list projection.
//!
//! [`partition`] turns the records fetched for a user into the three views
//! the home screen shows. It is a pure function: no I/O, no clock.

use serde::Serialize;

use super::{BookRecord, ReadingState, UserId};

/// A user's records split by reading progress.
///
/// Every record appears in exactly one view, and each view keeps the order
/// the records had in the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingList {
    /// Saved but not started.
    pub unstarted: Vec<BookRecord>,
    /// Started and not finished.
    pub in_progress: Vec<BookRecord>,
    /// Finished.
    pub finished: Vec<BookRecord>,
}

/// Number of records in each view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingStats {
    /// Saved but not started.
    pub unstarted: usize,
    /// Currently reading.
    pub in_progress: usize,
    /// Finished.
    pub finished: usize,
}

impl ReadingStats {
    /// Total number of records across all views.
    pub fn total(&self) -> usize {
        self.unstarted + self.in_progress + self.finished
    }
}

impl ReadingList {
    /// Counts per view.
    pub fn stats(&self) -> ReadingStats {
        ReadingStats {
            unstarted: self.unstarted.len(),
            in_progress: self.in_progress.len(),
            finished: self.finished.len(),
        }
    }

    /// Whether the user has no records at all.
    pub fn is_empty(&self) -> bool {
        self.stats().total() == 0
    }

    /// Records in the given view.
    pub fn view(&self, state: ReadingState) -> &[BookRecord] {
        match state {
            ReadingState::Unstarted => &self.unstarted,
            ReadingState::InProgress => &self.in_progress,
            ReadingState::Finished => &self.finished,
        }
    }

    fn push(&mut self, record: BookRecord) {
        match record.reading_state() {
            ReadingState::Unstarted => self.unstarted.push(record),
            ReadingState::InProgress => self.in_progress.push(record),
            ReadingState::Finished => self.finished.push(record),
        }
    }
}

/// Keep the records owned by `user_id` and classify them by progress.
///
/// Ownership is checked even when the caller already queried by user, so a
/// shared or unfiltered read never leaks another user's books.
///
/// # Examples
/// ```
/// use reader::domain::{partition, UserId};
///
/// let list = partition(Vec::new(), &UserId::new("u-1").unwrap());
/// assert!(list.is_empty());
/// ```
pub fn partition<I>(records: I, user_id: &UserId) -> ReadingList
where
    I: IntoIterator<Item = BookRecord>,
{
    records
        .into_iter()
        .filter(|record| record.is_owned_by(user_id))
        .fold(ReadingList::default(), |mut list, record| {
            list.push(record);
            list
        })
}
