//! Identity provider backed by configuration.

use async_trait::async_trait;

use crate::domain::Identity;
use crate::domain::ports::IdentityProvider;

/// Reports a fixed principal, or nobody when constructed signed out.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    identity: Option<Identity>,
}

impl StaticIdentityProvider {
    /// Provider with `identity` signed in.
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Provider with nobody signed in.
    pub fn signed_out() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_user(&self) -> Option<Identity> {
        self.identity.clone()
    }
}
