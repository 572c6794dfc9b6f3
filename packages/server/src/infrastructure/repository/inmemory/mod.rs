//! In-memory repository implementations.

pub mod session;

pub use session::InMemorySessionRepository;
