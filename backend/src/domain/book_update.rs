//! Minimal field diffs for partial record updates.
//!
//! [`build_diff`] compares a record with the values a user edited locally and
//! keeps only what changed. The resulting [`BookPatch`] is what the store
//! receives: fields it does not name are left untouched.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use super::{BookRecord, Rating};

/// Store field holding the notes.
pub const NOTES_FIELD: &str = "notes";
/// Store field holding the rating.
pub const RATING_FIELD: &str = "rating";
/// Store field holding the start timestamp.
pub const STARTED_READING_FIELD: &str = "started_reading_at";
/// Store field holding the finish timestamp.
pub const FINISHED_READING_FIELD: &str = "finished_reading_at";

/// Values the user has edited locally for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookEdit {
    /// Edited notes.
    pub notes: String,
    /// Edited rating.
    pub rating: Rating,
    /// The user asked to mark the book as started now.
    pub start_reading: bool,
    /// The user asked to mark the book as finished now.
    pub finish_reading: bool,
}

impl BookEdit {
    /// An edit that changes nothing on `record`.
    pub fn unchanged(record: &BookRecord) -> Self {
        Self {
            notes: record.notes.clone(),
            rating: record.rating,
            start_reading: false,
            finish_reading: false,
        }
    }
}

/// Partial update naming only the fields that change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPatch {
    /// New notes.
    pub notes: Option<String>,
    /// New rating.
    pub rating: Option<Rating>,
    /// Newly set start timestamp.
    pub started_reading: Option<DateTime<Utc>>,
    /// Newly set finish timestamp.
    pub finished_reading: Option<DateTime<Utc>>,
}

impl BookPatch {
    /// Whether the patch names no field.
    pub fn is_empty(&self) -> bool {
        self.field_names().is_empty()
    }

    /// Store field names the patch overwrites.
    pub fn field_names(&self) -> Vec<&'static str> {
        [
            (self.notes.is_some(), NOTES_FIELD),
            (self.rating.is_some(), RATING_FIELD),
            (self.started_reading.is_some(), STARTED_READING_FIELD),
            (self.finished_reading.is_some(), FINISHED_READING_FIELD),
        ]
        .into_iter()
        .filter_map(|(present, name)| present.then_some(name))
        .collect()
    }

    /// Field map in the shape the document store expects.
    ///
    /// Ratings are written as floating values and timestamps as RFC 3339
    /// strings in UTC.
    pub fn to_field_map(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(notes) = &self.notes {
            fields.insert(NOTES_FIELD.to_owned(), Value::from(notes.as_str()));
        }
        if let Some(rating) = self.rating {
            fields.insert(RATING_FIELD.to_owned(), Value::from(rating.as_stored()));
        }
        if let Some(at) = self.started_reading {
            fields.insert(STARTED_READING_FIELD.to_owned(), timestamp_value(at));
        }
        if let Some(at) = self.finished_reading {
            fields.insert(FINISHED_READING_FIELD.to_owned(), timestamp_value(at));
        }
        fields
    }

    /// Merge the patch into `record`, leaving unnamed fields untouched.
    pub fn apply_to(&self, record: &mut BookRecord) {
        if let Some(notes) = &self.notes {
            record.notes.clone_from(notes);
        }
        if let Some(rating) = self.rating {
            record.rating = rating;
        }
        if let Some(at) = self.started_reading {
            record.started_reading = Some(at);
        }
        if let Some(at) = self.finished_reading {
            record.finished_reading = Some(at);
        }
    }

    /// Whether applying the patch marks the book finished while it has never
    /// been started.
    pub fn finishes_unstarted(&self, original: &BookRecord) -> bool {
        self.finished_reading.is_some()
            && self.started_reading.is_none()
            && original.started_reading.is_none()
    }
}

fn timestamp_value(at: DateTime<Utc>) -> Value {
    Value::from(at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// Result of comparing a record with a local edit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookDiff {
    patch: BookPatch,
}

impl BookDiff {
    /// Changed fields.
    pub fn fields_changed(&self) -> &BookPatch {
        &self.patch
    }

    /// Whether anything changed.
    pub fn has_changes(&self) -> bool {
        !self.patch.is_empty()
    }

    /// Consume the diff, yielding its patch.
    pub fn into_patch(self) -> BookPatch {
        self.patch
    }
}

/// Compute the minimal update turning `original` into the edited values.
///
/// Notes and rating are written only when they differ. A start or finish
/// request writes `now` only when the matching timestamp is still absent, so
/// an existing timestamp is never moved. Identical inputs always produce the
/// same diff.
pub fn build_diff(original: &BookRecord, edit: &BookEdit, now: DateTime<Utc>) -> BookDiff {
    let newly_set = |requested: bool, current: Option<DateTime<Utc>>| {
        (requested && current.is_none()).then_some(now)
    };

    BookDiff {
        patch: BookPatch {
            notes: (edit.notes != original.notes).then(|| edit.notes.clone()),
            rating: (edit.rating != original.rating).then_some(edit.rating),
            started_reading: newly_set(edit.start_reading, original.started_reading),
            finished_reading: newly_set(edit.finish_reading, original.finished_reading),
        },
    }
}
