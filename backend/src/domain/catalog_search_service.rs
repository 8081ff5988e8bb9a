//! Catalog search service.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{CatalogSearch, CatalogSearchError};
use crate::domain::{CatalogItem, CatalogItemId, Error, SearchQuery};

fn map_catalog_error(error: CatalogSearchError) -> Error {
    match error {
        CatalogSearchError::Network { message } => {
            Error::network(format!("catalog request failed: {message}"))
        }
        CatalogSearchError::RateLimited { message } => {
            Error::rate_limited(format!("catalog rate limited: {message}"))
        }
        CatalogSearchError::NotFound { id } => {
            Error::not_found(format!("catalog item {id} not found"))
        }
        CatalogSearchError::Decode { message } => {
            Error::internal(format!("catalog response could not be decoded: {message}"))
        }
    }
}

/// A failed search, keeping the text the user typed so it can be resubmitted.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFailure {
    /// Query as entered.
    pub query: String,
    /// Why the search failed.
    pub error: Error,
}

impl fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "search for {:?} failed: {}", self.query, self.error)
    }
}

impl std::error::Error for SearchFailure {}

/// Service fronting the catalog search port.
#[derive(Clone)]
pub struct CatalogSearchService<C> {
    catalog: Arc<C>,
}

impl<C> CatalogSearchService<C>
where
    C: CatalogSearch,
{
    /// Create a service over `catalog`.
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// Search the catalog for `raw`.
    ///
    /// Blank input is rejected before any request is made.
    pub async fn search(&self, raw: &str) -> Result<Vec<CatalogItem>, SearchFailure> {
        let failure = |error: Error| SearchFailure {
            query: raw.to_owned(),
            error,
        };
        let query = SearchQuery::new(raw)
            .map_err(|err| failure(Error::invalid_request(err.to_string())))?;

        let items = self.catalog.search(&query).await.map_err(|err| {
            warn!(query = query.as_str(), error = %err, "catalog search failed");
            failure(map_catalog_error(err))
        })?;
        debug!(query = query.as_str(), hits = items.len(), "catalog search completed");
        Ok(items)
    }

    /// Full metadata for one catalog volume.
    pub async fn details(&self, id: &CatalogItemId) -> Result<CatalogItem, Error> {
        self.catalog.get_item(id).await.map_err(|err| {
            warn!(catalog_item_id = %id, error = %err, "catalog lookup failed");
            map_catalog_error(err)
        })
    }
}
