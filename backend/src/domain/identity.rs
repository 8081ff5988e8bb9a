//! Signed-in principal as reported by the identity provider.

use super::UserId;

/// Placeholder display name when no usable email is known.
pub const UNKNOWN_DISPLAY_NAME: &str = "N/A";

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable user identifier; owner key of book records.
    pub user_id: UserId,
    /// Email address, when the provider exposes one.
    pub email: Option<String>,
}

impl Identity {
    /// Build an identity.
    pub fn new(user_id: UserId, email: Option<String>) -> Self {
        Self { user_id, email }
    }

    /// Short name shown in the app bar: the email's local part.
    ///
    /// # Examples
    /// ```
    /// use reader::domain::{Identity, UserId};
    ///
    /// let who = Identity::new(UserId::new("u-1").unwrap(), Some("ada@example.com".into()));
    /// assert_eq!(who.display_name(), "ada");
    /// ```
    pub fn display_name(&self) -> &str {
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .map(str::trim)
            .filter(|local| !local.is_empty())
            .unwrap_or(UNKNOWN_DISPLAY_NAME)
    }
}
