//! Google Books outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `CatalogSearch`
//! port.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_GOOGLE_BOOKS_BASE_URL, GoogleBooksBuildError, GoogleBooksHttpSource};
