//! Shared fixtures for unit and integration tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{BookId, BookRecord, CatalogItemId, NewBookRecord, Rating, UserId};

/// Timestamp used wherever a test needs "now".
pub fn fixture_timestamp() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).single() {
        Some(at) => at,
        None => panic!("fixture timestamp must be valid"),
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(fixture_timestamp())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builder for [`BookRecord`] values with sensible defaults.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    id: String,
    draft: NewBookRecord,
}

impl RecordBuilder {
    /// Start a record with the given document id and owner.
    ///
    /// # Panics
    ///
    /// Panics when either identifier is blank.
    pub fn new(id: &str, user_id: &str) -> Self {
        let user_id = match UserId::new(user_id) {
            Ok(user_id) => user_id,
            Err(error) => panic!("fixture user id: {error}"),
        };
        Self {
            id: id.to_owned(),
            draft: NewBookRecord {
                google_book_id: catalog_id(&format!("vol-{id}")),
                user_id,
                title: format!("Title {id}"),
                authors: "A. Writer".to_owned(),
                description: String::new(),
                categories: "Fiction".to_owned(),
                photo_url: String::new(),
                published_date: "2001".to_owned(),
                page_count: "320".to_owned(),
                notes: String::new(),
                rating: Rating::default(),
                started_reading: None,
                finished_reading: None,
            },
        }
    }

    /// Set the catalog id.
    pub fn google_book_id(mut self, id: &str) -> Self {
        self.draft.google_book_id = catalog_id(id);
        self
    }

    /// Set the notes.
    pub fn notes(mut self, notes: &str) -> Self {
        notes.clone_into(&mut self.draft.notes);
        self
    }

    /// Set the rating.
    ///
    /// # Panics
    ///
    /// Panics when `stars` is out of range.
    pub fn rating(mut self, stars: u8) -> Self {
        self.draft.rating = match Rating::new(stars) {
            Ok(rating) => rating,
            Err(error) => panic!("fixture rating: {error}"),
        };
        self
    }

    /// Set the start timestamp.
    pub fn started(mut self, at: DateTime<Utc>) -> Self {
        self.draft.started_reading = Some(at);
        self
    }

    /// Set the finish timestamp.
    pub fn finished(mut self, at: DateTime<Utc>) -> Self {
        self.draft.finished_reading = Some(at);
        self
    }

    /// Draft without an id, as handed to the store on creation.
    pub fn draft(self) -> NewBookRecord {
        self.draft
    }

    /// Finished record.
    ///
    /// # Panics
    ///
    /// Panics when the document id is blank.
    pub fn build(self) -> BookRecord {
        let id = match BookId::new(&self.id) {
            Ok(id) => id,
            Err(error) => panic!("fixture book id: {error}"),
        };
        self.draft.into_record(id)
    }
}

fn catalog_id(raw: &str) -> CatalogItemId {
    match CatalogItemId::new(raw) {
        Ok(id) => id,
        Err(error) => panic!("fixture catalog id: {error}"),
    }
}
