//! Book record data model.
//!
//! A [`BookRecord`] is one book on a user's reading list together with its
//! reading-progress metadata. Records are created from a [`NewBookRecord`]
//! draft, which the store turns into a record by assigning a [`BookId`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation errors raised by the book value objects.
#[derive(Debug, Clone, PartialEq)]
pub enum BookValidationError {
    /// Book id was blank.
    EmptyBookId,
    /// User id was blank.
    EmptyUserId,
    /// Catalog item id was blank.
    EmptyCatalogItemId,
    /// Rating outside `0..=MAX_RATING`.
    RatingOutOfRange {
        /// Rejected value.
        value: f64,
    },
}

impl fmt::Display for BookValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBookId => write!(f, "book id must not be empty"),
            Self::EmptyUserId => write!(f, "user id must not be empty"),
            Self::EmptyCatalogItemId => write!(f, "catalog item id must not be empty"),
            Self::RatingOutOfRange { value } => {
                write!(f, "rating must be between 0 and {MAX_RATING}, got {value}")
            }
        }
    }
}

impl std::error::Error for BookValidationError {}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $empty:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the identifier from borrowed input.
            pub fn new(id: impl AsRef<str>) -> Result<Self, BookValidationError> {
                Self::from_owned(id.as_ref().to_owned())
            }

            fn from_owned(id: String) -> Result<Self, BookValidationError> {
                if id.trim().is_empty() {
                    return Err(BookValidationError::$empty);
                }
                Ok(Self(id))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = BookValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_owned(value)
            }
        }
    };
}

opaque_id!(
    /// Store-assigned document identifier of a book record.
    BookId,
    EmptyBookId
);

opaque_id!(
    /// Stable identifier of the signed-in principal, issued by the identity
    /// provider.
    UserId,
    EmptyUserId
);

opaque_id!(
    /// Identifier of a volume in the external book catalog.
    CatalogItemId,
    EmptyCatalogItemId
);

/// Highest rating a user can give.
pub const MAX_RATING: u8 = 5;

/// Star rating from 0 (unrated) to [`MAX_RATING`].
///
/// The store keeps ratings as floating values; conversion truncates the
/// fractional part and rejects anything outside the range.
///
/// # Examples
/// ```
/// use reader::domain::Rating;
///
/// let rating = Rating::try_from(4.0).unwrap();
/// assert_eq!(rating.value(), 4);
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(u8);

impl Rating {
    /// Construct a rating from a whole number of stars.
    pub fn new(stars: u8) -> Result<Self, BookValidationError> {
        if stars > MAX_RATING {
            return Err(BookValidationError::RatingOutOfRange {
                value: f64::from(stars),
            });
        }
        Ok(Self(stars))
    }

    /// Whole number of stars.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Floating representation written to the store.
    pub fn as_stored(self) -> f64 {
        f64::from(self.0)
    }
}

impl TryFrom<f64> for Rating {
    type Error = BookValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !(0.0..f64::from(MAX_RATING) + 1.0).contains(&value) {
            return Err(BookValidationError::RatingOutOfRange { value });
        }
        let whole = value.trunc();
        (0..=MAX_RATING)
            .find(|stars| f64::from(*stars) == whole)
            .map(Self)
            .ok_or(BookValidationError::RatingOutOfRange { value })
    }
}

impl From<Rating> for f64 {
    fn from(value: Rating) -> Self {
        value.as_stored()
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{MAX_RATING}", self.0)
    }
}

/// Reading progress derived from the two optional timestamps of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadingState {
    /// Neither started nor finished.
    Unstarted,
    /// Started and not yet finished.
    InProgress,
    /// Finished. A finish timestamp is terminal even without a start
    /// timestamp, since the store does not enforce the ordering.
    Finished,
}

impl ReadingState {
    /// Classify a record by the presence of its progress timestamps.
    pub fn from_timestamps(
        started_reading: Option<&DateTime<Utc>>,
        finished_reading: Option<&DateTime<Utc>>,
    ) -> Self {
        match (started_reading, finished_reading) {
            (_, Some(_)) => Self::Finished,
            (Some(_), None) => Self::InProgress,
            (None, None) => Self::Unstarted,
        }
    }
}

/// Client-generated field set for a record the store has not saved yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBookRecord {
    /// Catalog volume this record tracks.
    pub google_book_id: CatalogItemId,
    /// Owner; set once at creation.
    pub user_id: UserId,
    /// Book title.
    #[serde(default)]
    pub title: String,
    /// Display string of the book's authors.
    #[serde(default)]
    pub authors: String,
    /// Catalog description, possibly containing HTML.
    #[serde(default)]
    pub description: String,
    /// Display string of the catalog categories.
    #[serde(default)]
    pub categories: String,
    /// Cover image URL.
    #[serde(default)]
    pub photo_url: String,
    /// Publication date as reported by the catalog.
    #[serde(default)]
    pub published_date: String,
    /// Page count as reported by the catalog.
    #[serde(default)]
    pub page_count: String,
    /// The user's free-text notes.
    #[serde(default)]
    pub notes: String,
    /// The user's rating.
    #[serde(default)]
    pub rating: Rating,
    /// When the user started reading.
    #[serde(rename = "started_reading_at", default)]
    pub started_reading: Option<DateTime<Utc>>,
    /// When the user finished reading.
    #[serde(rename = "finished_reading_at", default)]
    pub finished_reading: Option<DateTime<Utc>>,
}

impl NewBookRecord {
    /// Attach the store-assigned identifier.
    pub fn into_record(self, id: BookId) -> BookRecord {
        BookRecord {
            id,
            google_book_id: self.google_book_id,
            user_id: self.user_id,
            title: self.title,
            authors: self.authors,
            description: self.description,
            categories: self.categories,
            photo_url: self.photo_url,
            published_date: self.published_date,
            page_count: self.page_count,
            notes: self.notes,
            rating: self.rating,
            started_reading: self.started_reading,
            finished_reading: self.finished_reading,
        }
    }
}

/// A saved book on a user's reading list.
///
/// ## Invariants
/// - `user_id` never changes after creation.
/// - Once `started_reading` is set it is never moved earlier or cleared.
/// - Once `finished_reading` is set the record is terminal for progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Store-assigned identifier.
    pub id: BookId,
    /// Catalog volume this record tracks.
    pub google_book_id: CatalogItemId,
    /// Owner.
    pub user_id: UserId,
    /// Book title.
    #[serde(default)]
    pub title: String,
    /// Display string of the book's authors.
    #[serde(default)]
    pub authors: String,
    /// Catalog description, possibly containing HTML.
    #[serde(default)]
    pub description: String,
    /// Display string of the catalog categories.
    #[serde(default)]
    pub categories: String,
    /// Cover image URL.
    #[serde(default)]
    pub photo_url: String,
    /// Publication date as reported by the catalog.
    #[serde(default)]
    pub published_date: String,
    /// Page count as reported by the catalog.
    #[serde(default)]
    pub page_count: String,
    /// The user's free-text notes.
    #[serde(default)]
    pub notes: String,
    /// The user's rating.
    #[serde(default)]
    pub rating: Rating,
    /// When the user started reading.
    #[serde(rename = "started_reading_at", default)]
    pub started_reading: Option<DateTime<Utc>>,
    /// When the user finished reading.
    #[serde(rename = "finished_reading_at", default)]
    pub finished_reading: Option<DateTime<Utc>>,
}

impl BookRecord {
    /// Current reading progress of this record.
    pub fn reading_state(&self) -> ReadingState {
        ReadingState::from_timestamps(
            self.started_reading.as_ref(),
            self.finished_reading.as_ref(),
        )
    }

    /// Whether the record belongs to `user_id`.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_identifiers_are_rejected(#[case] raw: &str) {
        assert_eq!(BookId::new(raw), Err(BookValidationError::EmptyBookId));
        assert_eq!(UserId::new(raw), Err(BookValidationError::EmptyUserId));
        assert_eq!(
            CatalogItemId::new(raw),
            Err(BookValidationError::EmptyCatalogItemId)
        );
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(3.0, 3)]
    #[case(4.7, 4)]
    #[case(5.0, 5)]
    fn stored_ratings_truncate_to_whole_stars(#[case] stored: f64, #[case] expected: u8) {
        let rating = Rating::try_from(stored).expect("rating in range");
        assert_eq!(rating.value(), expected);
    }

    #[rstest]
    #[case(-1.0)]
    #[case(-0.5)]
    #[case(-0.99)]
    #[case(6.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn out_of_range_ratings_are_rejected(#[case] stored: f64) {
        assert!(Rating::try_from(stored).is_err());
    }

    #[rstest]
    #[case(None, None, ReadingState::Unstarted)]
    #[case(Some(ts()), None, ReadingState::InProgress)]
    #[case(Some(ts()), Some(ts()), ReadingState::Finished)]
    #[case(None, Some(ts()), ReadingState::Finished)]
    fn reading_state_follows_timestamps(
        #[case] started: Option<DateTime<Utc>>,
        #[case] finished: Option<DateTime<Utc>>,
        #[case] expected: ReadingState,
    ) {
        assert_eq!(
            ReadingState::from_timestamps(started.as_ref(), finished.as_ref()),
            expected
        );
    }

    #[rstest]
    fn record_deserialises_store_field_names() {
        let record: BookRecord = serde_json::from_value(serde_json::json!({
            "id": "doc-1",
            "google_book_id": "vol-1",
            "user_id": "user-1",
            "title": "Dune",
            "rating": 3.0,
            "started_reading_at": "2024-03-01T09:00:00Z",
            "finished_reading_at": null,
        }))
        .expect("record decodes");

        assert_eq!(record.id.as_ref(), "doc-1");
        assert_eq!(record.rating.value(), 3);
        assert_eq!(record.started_reading, Some(ts()));
        assert_eq!(record.reading_state(), ReadingState::InProgress);
        assert!(record.notes.is_empty());
    }
}
