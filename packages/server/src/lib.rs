//! Realtime event server for Verdant.
//!
//! Keeps track of live WebSocket sessions and the rooms they belong to,
//! fans events out to the right connections and annotates logged
//! activities with their carbon impact.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::{ConfigError, ServerArgs, ServerConfig};
pub use error::ServerError;
pub use ui::run as run_server;
