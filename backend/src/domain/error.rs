//! Domain-level error types.
//!
//! These errors are transport agnostic. Callers (a screen, the CLI, a future
//! HTTP adapter) decide how to present them; the helpers on [`Error`] tell
//! them whether a retry prompt makes sense and whether in-flight local edits
//! should be kept.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The input failed validation before reaching a collaborator.
    InvalidRequest,
    /// No principal is signed in.
    Unauthenticated,
    /// The store refused the operation for the signed-in principal.
    PermissionDenied,
    /// The targeted record does not exist (or vanished since it was read).
    NotFound,
    /// The store could not be reached; the caller may retry later.
    StoreUnavailable,
    /// The catalog search request failed in transit.
    NetworkError,
    /// The catalog search API throttled the request.
    RateLimited,
    /// An unexpected failure inside an adapter.
    InternalError,
}

impl ErrorCode {
    /// Snake-case identifier used in logs and serialised payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Unauthenticated => "unauthenticated",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::StoreUnavailable => "store_unavailable",
            Self::NetworkError => "network_error",
            Self::RateLimited => "rate_limited",
            Self::InternalError => "internal_error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain error payload.
///
/// No component in this crate retries on its own; every failure travels back
/// to the caller that initiated the operation.
///
/// # Examples
/// ```
/// use reader::domain::{Error, ErrorCode};
///
/// let err = Error::store_unavailable("offline");
/// assert_eq!(err.code(), ErrorCode::StoreUnavailable);
/// assert!(err.is_retryable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use reader::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::not_found("gone").with_details(json!({ "bookId": "b-1" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Whether resubmitting the same operation later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::StoreUnavailable | ErrorCode::NetworkError | ErrorCode::RateLimited
        )
    }

    /// Whether an editing session must drop its local edits after this error.
    ///
    /// Only a vanished record discards them; every other failure keeps the
    /// edits so the user can resubmit.
    pub fn discards_local_edits(&self) -> bool {
        self.code == ErrorCode::NotFound
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthenticated`].
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthenticated, message)
    }

    /// Convenience constructor for [`ErrorCode::PermissionDenied`].
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PermissionDenied, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::StoreUnavailable`].
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::NetworkError`].
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkError, message)
    }

    /// Convenience constructor for [`ErrorCode::RateLimited`].
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RateLimited, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
