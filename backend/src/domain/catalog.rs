//! Catalog items returned by the external book search API.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CatalogItemId, NewBookRecord, Rating, UserId};

/// Cover shown when the catalog has no thumbnail for a volume.
pub const PLACEHOLDER_COVER_URL: &str = "https://books.google.com/books/content?id=ex-tDwAAQBAJ&printsec=frontcover&img=1&zoom=5&edge=curl&source=gbs_api";

/// Descriptive metadata for one catalog volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeInfo {
    /// Volume title.
    pub title: String,
    /// Author names in catalog order.
    pub authors: Vec<String>,
    /// Description, possibly containing HTML markup.
    pub description: String,
    /// Catalog categories.
    pub categories: Vec<String>,
    /// Publication date in whatever precision the catalog reports.
    pub published_date: String,
    /// Number of pages, when known.
    pub page_count: Option<u32>,
    /// Regular thumbnail URL.
    pub thumbnail: Option<String>,
    /// Small thumbnail URL.
    pub small_thumbnail: Option<String>,
}

/// One search hit from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Catalog identifier, stored on saved records as `google_book_id`.
    pub id: CatalogItemId,
    /// Volume metadata.
    pub volume: VolumeInfo,
}

impl CatalogItem {
    /// Cover image to display in search results.
    ///
    /// Prefers the small thumbnail, then the regular one, then a fixed
    /// placeholder.
    pub fn cover_url(&self) -> &str {
        non_blank(self.volume.small_thumbnail.as_deref())
            .or_else(|| non_blank(self.volume.thumbnail.as_deref()))
            .unwrap_or(PLACEHOLDER_COVER_URL)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|url| !url.trim().is_empty())
}

impl NewBookRecord {
    /// Build the record saved when a user adds a catalog volume to their list.
    ///
    /// Notes start empty, the rating starts at zero, and neither progress
    /// timestamp is set.
    pub fn from_catalog(item: &CatalogItem, user_id: UserId) -> Self {
        let volume = &item.volume;
        let photo_url = non_blank(volume.thumbnail.as_deref())
            .or_else(|| non_blank(volume.small_thumbnail.as_deref()))
            .unwrap_or_default()
            .to_owned();

        Self {
            google_book_id: item.id.clone(),
            user_id,
            title: volume.title.clone(),
            authors: volume.authors.join(", "),
            description: volume.description.clone(),
            categories: volume.categories.join(", "),
            photo_url,
            published_date: volume.published_date.clone(),
            page_count: volume
                .page_count
                .map(|pages| pages.to_string())
                .unwrap_or_default(),
            notes: String::new(),
            rating: Rating::default(),
            started_reading: None,
            finished_reading: None,
        }
    }
}

/// Validation errors for search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQueryError {
    /// The query was empty once trimmed.
    Blank,
}

impl fmt::Display for SearchQueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "search query must not be blank"),
        }
    }
}

impl std::error::Error for SearchQueryError {}

/// Trimmed, non-empty catalog search text.
///
/// # Examples
/// ```
/// use reader::domain::SearchQuery;
///
/// let query = SearchQuery::new("  dune  ").unwrap();
/// assert_eq!(query.as_str(), "dune");
/// assert!(SearchQuery::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Validate raw user input.
    pub fn new(raw: &str) -> Result<Self, SearchQueryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SearchQueryError::Blank);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Query text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
