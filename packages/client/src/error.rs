//! Client errors.

use thiserror::Error;

/// A line typed by the user could not be turned into a command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', type /help for the list")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{value}' is not a number")]
    InvalidNumber { value: String },

    #[error("commands start with '/', type /help for the list")]
    NotACommand,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: Box<tokio_tungstenite::tungstenite::Error>,
    },

    #[error("invalid connection request: {0}")]
    Request(String),

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("terminal error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
