//! Steam Families models

use serde::{Deserialize, Serialize};

use super::SteamId;

/// Role within a family group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyRole {
    None,
    Adult,
    Child,
    Unknown(i32),
}

impl From<i32> for FamilyRole {
    fn from(value: i32) -> Self {
        match value {
            0 => FamilyRole::None,
            1 => FamilyRole::Adult,
            2 => FamilyRole::Child,
            other => FamilyRole::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipHistoryEntry {
    #[serde(deserialize_with = "super::de::string_from_any")]
    pub family_groupid: String,

    #[serde(default)]
    pub rtime_joined: i64,

    #[serde(default)]
    pub rtime_left: i64,

    #[serde(default)]
    pub role: i32,

    #[serde(default)]
    pub participated: bool,
}

/// Result of `GetFamilyGroupForUser`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyGroupStatus {
    #[serde(default, deserialize_with = "super::de::string_from_any")]
    pub family_groupid: String,

    #[serde(default)]
    pub is_not_member_of_any_group: bool,

    #[serde(default)]
    pub latest_time_joined: i64,

    #[serde(default, deserialize_with = "super::de::string_from_any")]
    pub latest_joined_family_groupid: String,

    #[serde(default)]
    pub role: i32,

    #[serde(default)]
    pub cooldown_seconds_remaining: u64,

    #[serde(default)]
    pub can_undelete_last_joined_family: bool,

    #[serde(default)]
    pub membership_history: Vec<MembershipHistoryEntry>,
}

impl FamilyGroupStatus {
    pub fn is_member(&self) -> bool {
        !self.is_not_member_of_any_group
    }

    pub fn role(&self) -> FamilyRole {
        FamilyRole::from(self.role)
    }
}

/// Per-app playtime of one family member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaytimeEntry {
    pub steamid: SteamId,
    pub appid: u32,

    #[serde(default)]
    pub first_played: i64,

    #[serde(default)]
    pub latest_played: i64,

    #[serde(default)]
    pub seconds_played: u64,
}

impl PlaytimeEntry {
    pub fn hours_played(&self) -> f64 {
        self.seconds_played as f64 / 3600.0
    }
}

/// Result of `GetPlaytimeSummary`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaytimeSummary {
    #[serde(default)]
    pub entries: Vec<PlaytimeEntry>,
}
