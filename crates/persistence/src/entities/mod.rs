//! Database entity definitions (row mappings).

pub mod chat_list;
pub mod group;
pub mod notification;
pub mod user;

pub use chat_list::{ChatListEntryEntity, ChatVisibilityDb};
pub use group::{
    GroupEntity, GroupStatusDb, MemberWithProfileEntity, MembershipEntity, MembershipStatusDb,
};
pub use notification::{
    ChatRecordEntity, GroupEventKindDb, GroupSystemEventEntity, MessageKindDb,
};
pub use user::UserProfileEntity;
