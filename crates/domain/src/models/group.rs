//! Group and membership domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::Gender;

/// Lifecycle status of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    Active,
    Dismissed,
}

impl GroupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupStatus::Active => "active",
            GroupStatus::Dismissed => "dismissed",
        }
    }
}

impl FromStr for GroupStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(GroupStatus::Active),
            "dismissed" => Ok(GroupStatus::Dismissed),
            _ => Err(format!("Invalid group status: {}", s)),
        }
    }
}

impl fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Roster status of a membership. Inactive rows are soft-removed records,
/// kept so history survives and re-invitation can reuse the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Active,
    Inactive,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Active => "active",
            MembershipStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for MembershipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(MembershipStatus::Active),
            "inactive" => Ok(MembershipStatus::Inactive),
            _ => Err(format!("Invalid membership status: {}", s)),
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named multi-user chat group with a single owner.
///
/// `people_num` is a denormalized cache of the active-membership count. It is
/// recomputed after every roster change and must never be treated as the
/// source of truth for authorization or counting logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Group {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub avatar: String,
    pub profile: String,
    pub people_num: i32,
    pub status: GroupStatus,
    pub created_at: DateTime<Utc>,
}

/// A user's roster record within a group.
///
/// At most one row per (group, user) pair; exactly one row per group carries
/// the owner flag, set at creation and never reassigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Membership {
    pub id: Uuid,
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub is_owner: bool,
    pub status: MembershipStatus,
    /// Display alias within the group ("visit card").
    pub visit_card: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a group.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateGroupRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(max = 255, message = "Avatar must be at most 255 characters"))]
    pub avatar: String,

    #[validate(length(max = 500, message = "Profile must be at most 500 characters"))]
    pub profile: String,

    /// Users to add alongside the creator. The creator is always included
    /// even when absent from this list.
    pub invitee_ids: Vec<Uuid>,
}

impl CreateGroupRequest {
    /// All distinct participants of the new group, creator first.
    pub fn participants(&self, creator: Uuid) -> Vec<Uuid> {
        let mut ids = vec![creator];
        for &id in &self.invitee_ids {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }
}

/// Result of a successful group creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CreatedGroup {
    pub group: Group,
    /// Every participant that received a membership, creator first.
    pub member_ids: Vec<Uuid>,
}

/// One roster row in a group detail, joined with the member's public profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupMember {
    pub user_id: Uuid,
    pub is_owner: bool,
    pub visit_card: Option<String>,
    pub nickname: String,
    pub avatar: String,
    pub mobile: Option<String>,
    pub gender: Gender,
}

/// Full detail of a group as seen by one of its active members.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupDetail {
    pub group_id: Uuid,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub name: String,
    pub profile: String,
    pub avatar: String,
    pub people_num: i32,
    /// The caller's do-not-disturb preference for this group.
    pub not_disturb: bool,
    pub created_at: DateTime<Utc>,
    pub members: Vec<GroupMember>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_status_round_trip() {
        assert_eq!(GroupStatus::Active.as_str(), "active");
        assert_eq!(GroupStatus::Dismissed.as_str(), "dismissed");
        assert_eq!(GroupStatus::from_str("active").unwrap(), GroupStatus::Active);
        assert_eq!(
            GroupStatus::from_str("DISMISSED").unwrap(),
            GroupStatus::Dismissed
        );
        assert!(GroupStatus::from_str("deleted").is_err());
    }

    #[test]
    fn test_membership_status_round_trip() {
        assert_eq!(
            MembershipStatus::from_str("active").unwrap(),
            MembershipStatus::Active
        );
        assert_eq!(
            MembershipStatus::from_str("Inactive").unwrap(),
            MembershipStatus::Inactive
        );
        assert!(MembershipStatus::from_str("gone").is_err());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", GroupStatus::Active), "active");
        assert_eq!(format!("{}", MembershipStatus::Inactive), "inactive");
    }

    #[test]
    fn test_participants_includes_creator_first() {
        let creator = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let request = CreateGroupRequest {
            name: "Weekend Plans".to_string(),
            avatar: String::new(),
            profile: String::new(),
            invitee_ids: vec![a, b],
        };

        assert_eq!(request.participants(creator), vec![creator, a, b]);
    }

    #[test]
    fn test_participants_deduplicates() {
        let creator = Uuid::new_v4();
        let a = Uuid::new_v4();
        let request = CreateGroupRequest {
            name: "Weekend Plans".to_string(),
            avatar: String::new(),
            profile: String::new(),
            invitee_ids: vec![a, creator, a],
        };

        assert_eq!(request.participants(creator), vec![creator, a]);
    }

    #[test]
    fn test_create_group_request_validation() {
        let valid = CreateGroupRequest {
            name: "My Group".to_string(),
            avatar: "https://cdn.example.com/g.png".to_string(),
            profile: "A test group".to_string(),
            invitee_ids: vec![Uuid::new_v4()],
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateGroupRequest {
            name: String::new(),
            avatar: String::new(),
            profile: String::new(),
            invitee_ids: vec![],
        };
        assert!(empty_name.validate().is_err());

        let long_profile = CreateGroupRequest {
            name: "Test".to_string(),
            avatar: String::new(),
            profile: "x".repeat(501),
            invitee_ids: vec![],
        };
        assert!(long_profile.validate().is_err());
    }
}
