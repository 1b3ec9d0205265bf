//! Domain models for the group membership engine.

pub mod chat_list;
pub mod group;
pub mod notification;
pub mod user;

pub use chat_list::ChatListEntry;
pub use group::{Group, GroupDetail, Membership};
pub use notification::{ChatRecord, GroupSystemEvent};
pub use user::UserProfile;
