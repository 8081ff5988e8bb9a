//! Reqwest-backed Google Books catalog adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into domain catalog items.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};

use super::dto::{VolumeDto, VolumesResponseDto};
use crate::domain::ports::{CatalogSearch, CatalogSearchError};
use crate::domain::{CatalogItem, CatalogItemId, SearchQuery};

/// Public Google Books API root.
pub const DEFAULT_GOOGLE_BOOKS_BASE_URL: &str = "https://www.googleapis.com/books/v1/";

const USER_AGENT: &str = concat!("reader/", env!("CARGO_PKG_VERSION"));

/// Errors raised while building the adapter.
#[derive(Debug, thiserror::Error)]
pub enum GoogleBooksBuildError {
    /// The base URL cannot be extended with the volumes path.
    #[error("invalid catalog base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
    /// The base URL is not hierarchical.
    #[error("catalog base URL {0} cannot carry path segments")]
    OpaqueBaseUrl(Url),
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Catalog adapter issuing GET requests against the Google Books volumes API.
#[derive(Debug, Clone)]
pub struct GoogleBooksHttpSource {
    client: Client,
    volumes_url: Url,
    api_key: Option<String>,
}

impl GoogleBooksHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// A base URL without a trailing slash is treated as a directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is unusable or the reqwest client
    /// cannot be constructed.
    pub fn new(
        mut base_url: Url,
        timeout: Duration,
        api_key: Option<String>,
    ) -> Result<Self, GoogleBooksBuildError> {
        if base_url.cannot_be_a_base() {
            return Err(GoogleBooksBuildError::OpaqueBaseUrl(base_url));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let volumes_url = base_url.join("volumes")?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            volumes_url,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    fn volume_url(&self, id: &CatalogItemId) -> Result<Url, CatalogSearchError> {
        let mut url = self.volumes_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogSearchError::network("catalog URL cannot carry path segments"))?
            .push(id.as_ref());
        Ok(url)
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.query(&[("key", key.as_str())]),
            None => request,
        }
    }

    async fn fetch(
        &self,
        request: RequestBuilder,
        missing: Option<&CatalogItemId>,
    ) -> Result<Vec<u8>, CatalogSearchError> {
        let response = self
            .with_key(request)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref(), missing));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl CatalogSearch for GoogleBooksHttpSource {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<CatalogItem>, CatalogSearchError> {
        let request = self
            .client
            .get(self.volumes_url.clone())
            .query(&[("q", query.as_str())]);
        let body = self.fetch(request, None).await?;
        parse_volumes(&body)
    }

    async fn get_item(&self, id: &CatalogItemId) -> Result<CatalogItem, CatalogSearchError> {
        let request = self.client.get(self.volume_url(id)?);
        let body = self.fetch(request, Some(id)).await?;
        parse_volume(&body)
    }
}

fn parse_volumes(body: &[u8]) -> Result<Vec<CatalogItem>, CatalogSearchError> {
    let decoded: VolumesResponseDto = serde_json::from_slice(body).map_err(|error| {
        CatalogSearchError::decode(format!("invalid volumes JSON payload: {error}"))
    })?;
    decoded
        .into_domain_items()
        .map_err(CatalogSearchError::decode)
}

fn parse_volume(body: &[u8]) -> Result<CatalogItem, CatalogSearchError> {
    let decoded: VolumeDto = serde_json::from_slice(body).map_err(|error| {
        CatalogSearchError::decode(format!("invalid volume JSON payload: {error}"))
    })?;
    decoded
        .into_domain_item()
        .map_err(CatalogSearchError::decode)
}

fn map_transport_error(error: reqwest::Error) -> CatalogSearchError {
    if error.is_timeout() {
        CatalogSearchError::network(format!("request timed out: {error}"))
    } else {
        CatalogSearchError::network(error.to_string())
    }
}

fn map_status_error(
    status: StatusCode,
    body: &[u8],
    missing: Option<&CatalogItemId>,
) -> CatalogSearchError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match (status, missing) {
        (StatusCode::TOO_MANY_REQUESTS, _) => CatalogSearchError::rate_limited(message),
        (StatusCode::NOT_FOUND, Some(id)) => CatalogSearchError::not_found(id.as_ref()),
        _ => CatalogSearchError::network(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
