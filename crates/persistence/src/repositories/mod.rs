//! Repository implementations.

pub mod group;
pub mod user;

pub use group::GroupRepository;
pub use user::UserRepository;
