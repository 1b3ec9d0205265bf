//! Notification record entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::notification::{GroupEventKind, MessageKind};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum that maps to the PostgreSQL `message_kind` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "message_kind", rename_all = "snake_case")]
pub enum MessageKindDb {
    GroupSystemEvent,
}

impl From<MessageKindDb> for MessageKind {
    fn from(db_kind: MessageKindDb) -> Self {
        match db_kind {
            MessageKindDb::GroupSystemEvent => MessageKind::GroupSystemEvent,
        }
    }
}

impl From<MessageKind> for MessageKindDb {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::GroupSystemEvent => MessageKindDb::GroupSystemEvent,
        }
    }
}

/// Database enum that maps to the PostgreSQL `group_event_kind` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "group_event_kind", rename_all = "lowercase")]
pub enum GroupEventKindDb {
    Invited,
    Removed,
    Quit,
    Dismissed,
}

impl From<GroupEventKindDb> for GroupEventKind {
    fn from(db_kind: GroupEventKindDb) -> Self {
        match db_kind {
            GroupEventKindDb::Invited => GroupEventKind::Invited,
            GroupEventKindDb::Removed => GroupEventKind::Removed,
            GroupEventKindDb::Quit => GroupEventKind::Quit,
            GroupEventKindDb::Dismissed => GroupEventKind::Dismissed,
        }
    }
}

impl From<GroupEventKind> for GroupEventKindDb {
    fn from(kind: GroupEventKind) -> Self {
        match kind {
            GroupEventKind::Invited => GroupEventKindDb::Invited,
            GroupEventKind::Removed => GroupEventKindDb::Removed,
            GroupEventKind::Quit => GroupEventKindDb::Quit,
            GroupEventKind::Dismissed => GroupEventKindDb::Dismissed,
        }
    }
}

/// Database row mapping for the chat_records table (message envelope).
#[derive(Debug, Clone, FromRow)]
pub struct ChatRecordEntity {
    pub id: Uuid,
    pub kind: MessageKindDb,
    pub group_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<ChatRecordEntity> for domain::models::ChatRecord {
    fn from(entity: ChatRecordEntity) -> Self {
        Self {
            id: entity.id,
            kind: entity.kind.into(),
            group_id: entity.group_id,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the group_system_events table (event payload).
#[derive(Debug, Clone, FromRow)]
pub struct GroupSystemEventEntity {
    pub record_id: Uuid,
    pub event: GroupEventKindDb,
    pub operated_by: Uuid,
    pub affected_user_ids: Vec<Uuid>,
}

impl From<GroupSystemEventEntity> for domain::models::GroupSystemEvent {
    fn from(entity: GroupSystemEventEntity) -> Self {
        Self {
            record_id: entity.record_id,
            event: entity.event.into(),
            operated_by: entity.operated_by,
            affected_user_ids: entity.affected_user_ids,
        }
    }
}
