//! Chat-list entry entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::chat_list::ChatVisibility;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum that maps to the PostgreSQL `chat_visibility` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "chat_visibility", rename_all = "lowercase")]
pub enum ChatVisibilityDb {
    Visible,
    Hidden,
}

impl From<ChatVisibilityDb> for ChatVisibility {
    fn from(db_visibility: ChatVisibilityDb) -> Self {
        match db_visibility {
            ChatVisibilityDb::Visible => ChatVisibility::Visible,
            ChatVisibilityDb::Hidden => ChatVisibility::Hidden,
        }
    }
}

impl From<ChatVisibility> for ChatVisibilityDb {
    fn from(visibility: ChatVisibility) -> Self {
        match visibility {
            ChatVisibility::Visible => ChatVisibilityDb::Visible,
            ChatVisibility::Hidden => ChatVisibilityDb::Hidden,
        }
    }
}

/// Database row mapping for the chat_list_entries table.
#[derive(Debug, Clone, FromRow)]
pub struct ChatListEntryEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub group_id: Uuid,
    pub visibility: ChatVisibilityDb,
    pub not_disturb: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ChatListEntryEntity> for domain::models::ChatListEntry {
    fn from(entity: ChatListEntryEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            group_id: entity.group_id,
            visibility: entity.visibility.into(),
            not_disturb: entity.not_disturb,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
