//! System-notification records for membership lifecycle events.
//!
//! A notification is a tagged pair: a generic message envelope
//! ([`ChatRecord`]) plus a specialized payload ([`GroupSystemEvent`]) keyed by
//! the envelope id. Both are append-only and never updated or deleted; they
//! form the audit trail of every membership change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of message carried by a [`ChatRecord`] envelope.
///
/// This engine only ever emits `GroupSystemEvent`; the envelope is shared
/// with ordinary chat traffic upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    GroupSystemEvent,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::GroupSystemEvent => "group_system_event",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Subtype of a group system event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupEventKind {
    /// Members were added. Group creation and later invitations share this
    /// kind; the payload lists every member added.
    Invited,
    /// A member was removed by the owner.
    Removed,
    /// A member left voluntarily.
    Quit,
    /// Reserved. Dismissal currently emits no record; the kind exists so the
    /// taxonomy is complete if that changes.
    Dismissed,
}

impl GroupEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupEventKind::Invited => "invited",
            GroupEventKind::Removed => "removed",
            GroupEventKind::Quit => "quit",
            GroupEventKind::Dismissed => "dismissed",
        }
    }
}

impl FromStr for GroupEventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "invited" => Ok(GroupEventKind::Invited),
            "removed" => Ok(GroupEventKind::Removed),
            "quit" => Ok(GroupEventKind::Quit),
            "dismissed" => Ok(GroupEventKind::Dismissed),
            _ => Err(format!("Invalid group event kind: {}", s)),
        }
    }
}

impl fmt::Display for GroupEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable message envelope attached to a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChatRecord {
    pub id: Uuid,
    pub kind: MessageKind,
    pub group_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Specialized payload of a group system event, keyed by its envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupSystemEvent {
    pub record_id: Uuid,
    pub event: GroupEventKind,
    /// The user that performed the operation.
    pub operated_by: Uuid,
    /// The user(s) the operation affected.
    pub affected_user_ids: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_round_trip() {
        for kind in [
            GroupEventKind::Invited,
            GroupEventKind::Removed,
            GroupEventKind::Quit,
            GroupEventKind::Dismissed,
        ] {
            assert_eq!(GroupEventKind::from_str(kind.as_str()).unwrap(), kind);
        }
        assert!(GroupEventKind::from_str("renamed").is_err());
    }

    #[test]
    fn test_event_kind_display() {
        assert_eq!(format!("{}", GroupEventKind::Removed), "removed");
        assert_eq!(format!("{}", MessageKind::GroupSystemEvent), "group_system_event");
    }
}
