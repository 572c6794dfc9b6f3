//! Shared utilities for the Verdant realtime server and client.

pub mod logger;
pub mod time;
