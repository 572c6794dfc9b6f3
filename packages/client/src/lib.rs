//! Interactive command-line client for the Verdant realtime server.
//!
//! Reads slash commands from the terminal, sends them as inbound frames and
//! prints every event the server pushes back.

pub mod command;
pub mod display;
pub mod error;
pub mod runner;

// Re-export entry points
pub use runner::{ClientArgs, run_client};
