//! Domain primitives, aggregates and services.
//!
//! Purpose: model a user's saved books, the three progress views derived from
//! their reading timestamps, and the protocol for editing and deleting a saved
//! record. Everything here is transport agnostic; adapters live in
//! `crate::outbound` and talk to the domain through `ports`.
//!
//! Public surface:
//! - `BookRecord` / `NewBookRecord`: stored and draft book documents.
//! - `partition` / `ReadingList`: per-user progress views.
//! - `build_diff` / `BookPatch`: minimal partial updates.
//! - `UpdateSession` / `DeleteFlow`: per-record interaction state machines.
//! - `ReadingListService`, `BookUpdateService`, `CatalogSearchService`.
//! - `Error` / `ErrorCode`: transport-agnostic failures.

pub mod book;
pub mod book_update;
pub mod book_update_service;
pub mod catalog;
pub mod catalog_search_service;
pub mod delete_flow;
pub mod error;
pub mod identity;
pub mod ports;
pub mod reading_list;
pub mod reading_list_service;
pub mod update_session;

pub use self::book::{
    BookId, BookRecord, BookValidationError, CatalogItemId, MAX_RATING, NewBookRecord, Rating,
    ReadingState, UserId,
};
pub use self::book_update::{
    BookDiff, BookEdit, BookPatch, FINISHED_READING_FIELD, NOTES_FIELD, RATING_FIELD,
    STARTED_READING_FIELD, build_diff,
};
pub use self::book_update_service::{BookUpdateService, UpdateOutcome};
pub use self::catalog::{
    CatalogItem, PLACEHOLDER_COVER_URL, SearchQuery, SearchQueryError, VolumeInfo,
};
pub use self::catalog_search_service::{CatalogSearchService, SearchFailure};
pub use self::delete_flow::{DeleteConfirmation, DeleteFlow, DeleteFlowError, DeleteState};
pub use self::error::{Error, ErrorCode};
pub use self::identity::{Identity, UNKNOWN_DISPLAY_NAME};
pub use self::reading_list::{ReadingList, ReadingStats, partition};
pub use self::reading_list_service::ReadingListService;
pub use self::update_session::{UpdateSession, UpdateSessionError, UpdateState};
