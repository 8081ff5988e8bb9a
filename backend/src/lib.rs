//! Reading-list core for a book-tracking app.
//!
//! The domain models saved books and their progress views; outbound adapters
//! connect it to the book catalog API, a document store and the signed-in
//! identity.

pub mod domain;
pub mod outbound;
pub mod settings;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
