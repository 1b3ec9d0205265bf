//! User profile entity (database row mapping).

use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the public fields of the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserProfileEntity {
    pub id: Uuid,
    pub nickname: String,
    pub avatar: String,
    pub mobile: Option<String>,
    pub gender: i16,
}

impl From<UserProfileEntity> for domain::models::UserProfile {
    fn from(entity: UserProfileEntity) -> Self {
        Self {
            id: entity.id,
            nickname: entity.nickname,
            avatar: entity.avatar,
            mobile: entity.mobile,
            gender: entity.gender.into(),
        }
    }
}
