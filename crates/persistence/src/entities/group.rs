//! Group and membership entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::group::{GroupStatus, MembershipStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum that maps to the PostgreSQL `group_status` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "group_status", rename_all = "lowercase")]
pub enum GroupStatusDb {
    Active,
    Dismissed,
}

impl From<GroupStatusDb> for GroupStatus {
    fn from(db_status: GroupStatusDb) -> Self {
        match db_status {
            GroupStatusDb::Active => GroupStatus::Active,
            GroupStatusDb::Dismissed => GroupStatus::Dismissed,
        }
    }
}

impl From<GroupStatus> for GroupStatusDb {
    fn from(status: GroupStatus) -> Self {
        match status {
            GroupStatus::Active => GroupStatusDb::Active,
            GroupStatus::Dismissed => GroupStatusDb::Dismissed,
        }
    }
}

/// Database enum that maps to the PostgreSQL `membership_status` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "membership_status", rename_all = "lowercase")]
pub enum MembershipStatusDb {
    Active,
    Inactive,
}

impl From<MembershipStatusDb> for MembershipStatus {
    fn from(db_status: MembershipStatusDb) -> Self {
        match db_status {
            MembershipStatusDb::Active => MembershipStatus::Active,
            MembershipStatusDb::Inactive => MembershipStatus::Inactive,
        }
    }
}

impl From<MembershipStatus> for MembershipStatusDb {
    fn from(status: MembershipStatus) -> Self {
        match status {
            MembershipStatus::Active => MembershipStatusDb::Active,
            MembershipStatus::Inactive => MembershipStatusDb::Inactive,
        }
    }
}

/// Database row mapping for the groups table.
#[derive(Debug, Clone, FromRow)]
pub struct GroupEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub avatar: String,
    pub profile: String,
    pub people_num: i32,
    pub status: GroupStatusDb,
    pub created_at: DateTime<Utc>,
}

impl From<GroupEntity> for domain::models::Group {
    fn from(entity: GroupEntity) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            name: entity.name,
            avatar: entity.avatar,
            profile: entity.profile,
            people_num: entity.people_num,
            status: entity.status.into(),
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the group_members table.
#[derive(Debug, Clone, FromRow)]
pub struct MembershipEntity {
    pub id: Uuid,
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub is_owner: bool,
    pub status: MembershipStatusDb,
    pub visit_card: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MembershipEntity> for domain::models::Membership {
    fn from(entity: MembershipEntity) -> Self {
        Self {
            id: entity.id,
            group_id: entity.group_id,
            user_id: entity.user_id,
            is_owner: entity.is_owner,
            status: entity.status.into(),
            visit_card: entity.visit_card,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Roster row joined with the member's public profile fields.
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithProfileEntity {
    pub user_id: Uuid,
    pub is_owner: bool,
    pub visit_card: Option<String>,
    // Profile fields
    pub nickname: String,
    pub avatar: String,
    pub mobile: Option<String>,
    pub gender: i16,
}

impl From<MemberWithProfileEntity> for domain::models::group::GroupMember {
    fn from(entity: MemberWithProfileEntity) -> Self {
        Self {
            user_id: entity.user_id,
            is_owner: entity.is_owner,
            visit_card: entity.visit_card,
            nickname: entity.nickname,
            avatar: entity.avatar,
            mobile: entity.mobile,
            gender: entity.gender.into(),
        }
    }
}
