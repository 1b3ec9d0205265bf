//! Public user profile fields, read from the upstream profile source.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declared gender on a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Unknown,
    Male,
    Female,
}

impl From<i16> for Gender {
    fn from(value: i16) -> Self {
        match value {
            1 => Gender::Male,
            2 => Gender::Female,
            _ => Gender::Unknown,
        }
    }
}

impl From<Gender> for i16 {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Unknown => 0,
            Gender::Male => 1,
            Gender::Female => 2,
        }
    }
}

/// Public profile of a user. This engine never mutates profile data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UserProfile {
    pub id: Uuid,
    pub nickname: String,
    pub avatar: String,
    pub mobile: Option<String>,
    pub gender: Gender,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_from_i16() {
        assert_eq!(Gender::from(0), Gender::Unknown);
        assert_eq!(Gender::from(1), Gender::Male);
        assert_eq!(Gender::from(2), Gender::Female);
        // Out-of-range values collapse to unknown rather than failing.
        assert_eq!(Gender::from(7), Gender::Unknown);
    }

    #[test]
    fn test_gender_to_i16() {
        assert_eq!(i16::from(Gender::Male), 1);
        assert_eq!(i16::from(Gender::Female), 2);
        assert_eq!(i16::from(Gender::Unknown), 0);
    }
}
