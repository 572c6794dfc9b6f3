//! Port to the external auth collaborator.

use async_trait::async_trait;

use super::{entity::UserIdentity, error::AuthError, value_object::Credential};

/// Resolves a bearer credential to a user identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn validate_credential(&self, credential: &Credential)
    -> Result<UserIdentity, AuthError>;
}
