//! Static token authenticator.
//!
//! Stands in for the external auth collaborator: tokens and identities are
//! loaded once at startup (see `--users`) and never change.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{
    AuthError, Authenticator, Credential, DisplayName, UserId, UserIdentity, ValueObjectError,
};

/// One entry of the users file.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub token: String,
    pub id: String,
    pub display_name: String,
}

/// Resolves bearer tokens against a fixed token -> identity map.
#[derive(Debug, Default)]
pub struct StaticTokenAuthenticator {
    identities: HashMap<String, UserIdentity>,
}

impl StaticTokenAuthenticator {
    /// Build the authenticator from user records.
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError` if a record has an invalid id, display name
    /// or token. Surrounding whitespace in a token is trimmed.
    pub fn from_records(records: Vec<UserRecord>) -> Result<Self, ValueObjectError> {
        let mut identities = HashMap::with_capacity(records.len());
        for record in records {
            let identity = UserIdentity::new(
                UserId::new(record.id)?,
                DisplayName::new(record.display_name)?,
            );
            // stored in the same normalized form presented credentials take
            let token = Credential::new(record.token)
                .map_err(|_| ValueObjectError::TokenMalformed(identity.id.to_string()))?;
            if identities
                .insert(token.as_str().to_string(), identity.clone())
                .is_some()
            {
                tracing::warn!("Duplicate token in user records; keeping '{}'", identity.id);
            }
        }
        Ok(Self { identities })
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

#[async_trait]
impl Authenticator for StaticTokenAuthenticator {
    async fn validate_credential(
        &self,
        credential: &Credential,
    ) -> Result<UserIdentity, AuthError> {
        self.identities
            .get(credential.as_str())
            .cloned()
            .ok_or(AuthError::UnknownCredential)
    }
}
