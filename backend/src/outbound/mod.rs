//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **google_books**: reqwest-backed catalog search
//! - **memory_store**: in-process book store with partial-merge updates
//! - **static_identity**: identity taken from configuration
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod google_books;
pub mod memory_store;
pub mod static_identity;

pub use google_books::GoogleBooksHttpSource;
pub use memory_store::InMemoryBookStore;
pub use static_identity::StaticIdentityProvider;
