//! Persistence layer for the group membership engine.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations, including the transactional
//!   group membership engine

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
