//! Player and friend models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SteamId;

/// Online status reported in player summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaState {
    Offline,
    Online,
    Busy,
    Away,
    Snooze,
    LookingToTrade,
    LookingToPlay,
    Unknown(u8),
}

impl From<u8> for PersonaState {
    fn from(value: u8) -> Self {
        match value {
            0 => PersonaState::Offline,
            1 => PersonaState::Online,
            2 => PersonaState::Busy,
            3 => PersonaState::Away,
            4 => PersonaState::Snooze,
            5 => PersonaState::LookingToTrade,
            6 => PersonaState::LookingToPlay,
            other => PersonaState::Unknown(other),
        }
    }
}

/// Player summary from `ISteamUser/GetPlayerSummaries`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub steamid: SteamId,

    pub personaname: String,

    #[serde(default)]
    pub profileurl: String,

    #[serde(default)]
    pub avatar: String,

    #[serde(default)]
    pub avatarmedium: String,

    #[serde(default)]
    pub avatarfull: String,

    #[serde(default)]
    pub personastate: u8,

    /// 1 = private, 2 = friends only, 3 = public
    #[serde(default)]
    pub communityvisibilitystate: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profilestate: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastlogoff: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentpermission: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primaryclanid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timecreated: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gameid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gameserverip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gameextrainfo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loccountrycode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locstatecode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loccityid: Option<u32>,
}

impl PlayerSummary {
    pub fn persona_state(&self) -> PersonaState {
        PersonaState::from(self.personastate)
    }

    pub fn is_online(&self) -> bool {
        self.persona_state() != PersonaState::Offline
    }

    pub fn is_in_game(&self) -> bool {
        self.gameid.is_some()
    }

    pub fn is_public(&self) -> bool {
        self.communityvisibilitystate == 3
    }
}

/// Entry of `ISteamUser/GetFriendList`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friend {
    pub steamid: SteamId,

    #[serde(default)]
    pub relationship: String,

    /// Unix timestamp the friendship started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friend_since: Option<i64>,
}

impl Friend {
    pub fn friend_since_datetime(&self) -> Option<DateTime<Utc>> {
        self.friend_since
            .filter(|ts| *ts > 0)
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

/// Ban record from `ISteamUser/GetPlayerBans`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerBan {
    #[serde(rename = "SteamId")]
    pub steam_id: SteamId,

    pub community_banned: bool,

    #[serde(rename = "VACBanned")]
    pub vac_banned: bool,

    #[serde(rename = "NumberOfVACBans")]
    pub number_of_vac_bans: u32,

    pub days_since_last_ban: u32,

    pub number_of_game_bans: u32,

    /// `none`, `probation` or `banned`
    pub economy_ban: String,
}

impl PlayerBan {
    pub fn is_banned(&self) -> bool {
        self.community_banned || self.vac_banned || self.number_of_game_bans > 0
    }

    pub fn has_economy_ban(&self) -> bool {
        self.economy_ban != "none"
    }
}

/// Result of `ISteamUser/ResolveVanityURL`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VanityUrlResolution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steamid: Option<SteamId>,

    /// 1 on success, 42 when no match
    pub success: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VanityUrlResolution {
    pub fn is_success(&self) -> bool {
        self.success == 1
    }
}
