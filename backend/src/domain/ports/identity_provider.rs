//! Port for the authentication provider.

use async_trait::async_trait;

use crate::domain::Identity;

/// Reports who is signed in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The signed-in principal, or `None` when nobody is signed in.
    async fn current_user(&self) -> Option<Identity>;
}
