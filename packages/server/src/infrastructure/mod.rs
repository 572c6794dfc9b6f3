//! Infrastructure layer: concrete adapters for the domain ports and wire DTOs.

pub mod auth;
pub mod dto;
pub mod repository;
