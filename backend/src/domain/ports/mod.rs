//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod book_store;
mod catalog_search;
mod identity_provider;

#[cfg(test)]
pub use book_store::MockBookStore;
pub use book_store::{BookStore, BookStoreError};
#[cfg(test)]
pub use catalog_search::MockCatalogSearch;
pub use catalog_search::{CatalogSearch, CatalogSearchError};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::IdentityProvider;
