//! Server state and connection management.

use std::sync::Arc;

use serde::Deserialize;

use crate::{
    config::{ConfigError, ServerConfig},
    domain::{Authenticator, EmissionFactorTable, SessionRepository},
    infrastructure::{auth::StaticTokenAuthenticator, repository::InMemorySessionRepository},
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Bearer token, for clients that cannot set headers (browsers)
    pub token: Option<String>,
}

/// Shared application state
///
/// Owns the session registry explicitly; handlers reach it only through
/// this state, never through globals.
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn SessionRepository>,
    /// External auth collaborator
    pub authenticator: Arc<dyn Authenticator>,
    /// Read-only emission-factor table
    pub emission_factors: Arc<EmissionFactorTable>,
    /// Token required on the publish endpoint, if any
    pub publish_token: Option<String>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        authenticator: Arc<dyn Authenticator>,
        emission_factors: EmissionFactorTable,
        publish_token: Option<String>,
    ) -> Self {
        Self {
            repository,
            authenticator,
            emission_factors: Arc::new(emission_factors),
            publish_token,
        }
    }

    /// Build the state from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUser` if a user record is invalid.
    pub fn from_config(config: ServerConfig) -> Result<Self, ConfigError> {
        let authenticator = StaticTokenAuthenticator::from_records(config.users)?;
        if authenticator.is_empty() {
            tracing::warn!("No users configured; every websocket connection will be refused");
        } else {
            tracing::info!("Loaded {} user tokens", authenticator.len());
        }
        if config.publish_token.is_none() {
            tracing::warn!("No publish token configured; POST /api/events is unauthenticated");
        }

        Ok(Self::new(
            Arc::new(InMemorySessionRepository::new()),
            Arc::new(authenticator),
            config.emission_factors,
            config.publish_token,
        ))
    }
}
