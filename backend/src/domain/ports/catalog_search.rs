//! Driven port for the external book catalog.

use async_trait::async_trait;

use crate::domain::{CatalogItem, CatalogItemId, SearchQuery};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the catalog API.
    pub enum CatalogSearchError {
        /// The request failed in transit or timed out.
        Network { message: String } =>
            "catalog request failed: {message}",
        /// The API throttled the request.
        RateLimited { message: String } =>
            "catalog rate limited request: {message}",
        /// The catalog has no volume with this id.
        NotFound { id: String } =>
            "catalog item {id} not found",
        /// The response could not be decoded.
        Decode { message: String } =>
            "catalog response decode failed: {message}",
    }
}

impl CatalogSearchError {
    /// Whether resubmitting the same request later may help.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::RateLimited { .. })
    }
}

/// Port for searching the book catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Volumes matching `query`, in catalog relevance order.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<CatalogItem>, CatalogSearchError>;

    /// Full metadata for one volume.
    async fn get_item(&self, id: &CatalogItemId) -> Result<CatalogItem, CatalogSearchError>;
}
