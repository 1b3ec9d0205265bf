//! Domain layer for the group membership engine.
//!
//! This crate contains:
//! - Domain models (Group, Membership, ChatListEntry, notification records)
//! - Request/response DTOs with validation
//! - Domain error types

pub mod error;
pub mod models;

pub use error::EngineError;
