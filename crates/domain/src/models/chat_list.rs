//! Chat-list entry domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Visibility of a conversation in a user's chat list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatVisibility {
    Visible,
    Hidden,
}

impl ChatVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatVisibility::Visible => "visible",
            ChatVisibility::Hidden => "hidden",
        }
    }
}

impl FromStr for ChatVisibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "visible" => Ok(ChatVisibility::Visible),
            "hidden" => Ok(ChatVisibility::Hidden),
            _ => Err(format!("Invalid chat visibility: {}", s)),
        }
    }
}

impl fmt::Display for ChatVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-user visibility and preference record for a group conversation.
///
/// Lifecycled independently of the membership: created lazily on first join,
/// then toggled on removal/rejoin rather than recreated, so the
/// do-not-disturb preference survives a removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChatListEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub group_id: Uuid,
    pub visibility: ChatVisibility,
    pub not_disturb: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_visibility_round_trip() {
        assert_eq!(
            ChatVisibility::from_str("visible").unwrap(),
            ChatVisibility::Visible
        );
        assert_eq!(
            ChatVisibility::from_str("HIDDEN").unwrap(),
            ChatVisibility::Hidden
        );
        assert!(ChatVisibility::from_str("muted").is_err());
    }

    #[test]
    fn test_chat_visibility_display() {
        assert_eq!(format!("{}", ChatVisibility::Visible), "visible");
        assert_eq!(format!("{}", ChatVisibility::Hidden), "hidden");
    }
}
