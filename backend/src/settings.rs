//! Reader configuration loaded via OrthoConfig.
//!
//! Values come from `READER_*` environment variables or a configuration file;
//! anything unset falls back to a default.

use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

use crate::domain::{BookValidationError, Identity, UserId};
use crate::outbound::google_books::DEFAULT_GOOGLE_BOOKS_BASE_URL;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Settings for the catalog client and the configured identity.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "READER")]
pub struct ReaderSettings {
    /// Catalog API root.
    pub catalog_base_url: Option<String>,
    /// Timeout applied to each catalog request, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Catalog API key appended to requests when set.
    pub api_key: Option<String>,
    /// Identifier of the signed-in user.
    pub user_id: Option<String>,
    /// Email of the signed-in user.
    pub email: Option<String>,
}

impl ReaderSettings {
    /// Return the catalog API root, falling back to the public Google Books API.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a valid URL.
    pub fn catalog_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(
            self.catalog_base_url
                .as_deref()
                .unwrap_or(DEFAULT_GOOGLE_BOOKS_BASE_URL),
        )
    }

    /// Return the per-request timeout, falling back to the default.
    ///
    /// Zero is raised to one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
                .max(1),
        )
    }

    /// Return the configured identity, or `None` when no user id is set.
    ///
    /// # Errors
    ///
    /// Returns an error when the user id is present but blank.
    pub fn identity(&self) -> Result<Option<Identity>, BookValidationError> {
        self.user_id
            .as_deref()
            .map(|raw| UserId::new(raw).map(|user_id| Identity::new(user_id, self.email.clone())))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for reader configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "READER_CATALOG_BASE_URL",
        "READER_REQUEST_TIMEOUT_SECS",
        "READER_API_KEY",
        "READER_USER_ID",
        "READER_EMAIL",
    ];

    fn load_from_empty_args() -> ReaderSettings {
        ReaderSettings::load_from_iter([OsString::from("reader")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.catalog_base_url().expect("default URL").as_str(),
            DEFAULT_GOOGLE_BOOKS_BASE_URL
        );
        assert_eq!(
            settings.request_timeout(),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert!(settings.api_key.is_none());
        assert_eq!(settings.identity(), Ok(None));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("READER_CATALOG_BASE_URL", Some("http://127.0.0.1:9000/books/".to_owned())),
            ("READER_REQUEST_TIMEOUT_SECS", Some("3".to_owned())),
            ("READER_API_KEY", Some("secret".to_owned())),
            ("READER_USER_ID", Some("u-42".to_owned())),
            ("READER_EMAIL", Some("ada@example.com".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.catalog_base_url().expect("URL").as_str(),
            "http://127.0.0.1:9000/books/"
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(3));
        assert_eq!(settings.api_key.as_deref(), Some("secret"));

        let identity = settings
            .identity()
            .expect("valid identity")
            .expect("identity configured");
        assert_eq!(identity.user_id.as_ref(), "u-42");
        assert_eq!(identity.display_name(), "ada");
    }

    #[rstest]
    #[case(Some(0), 1)]
    #[case(Some(30), 30)]
    #[case(None, DEFAULT_REQUEST_TIMEOUT_SECS)]
    fn request_timeout_is_at_least_one_second(#[case] raw: Option<u64>, #[case] expected: u64) {
        let settings = ReaderSettings {
            catalog_base_url: None,
            request_timeout_secs: raw,
            api_key: None,
            user_id: None,
            email: None,
        };
        assert_eq!(settings.request_timeout(), Duration::from_secs(expected));
    }

    #[rstest]
    fn blank_user_id_is_rejected() {
        let settings = ReaderSettings {
            catalog_base_url: None,
            request_timeout_secs: None,
            api_key: None,
            user_id: Some("  ".to_owned()),
            email: None,
        };
        assert_eq!(settings.identity(), Err(BookValidationError::EmptyUserId));
    }
}
