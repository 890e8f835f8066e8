//! Game, app and achievement models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::SteamId;

const MEDIA_BASE: &str = "http://media.steampowered.com/steamcommunity/public/images/apps";

fn minutes_to_hours(minutes: u32) -> f64 {
    (minutes as f64 / 60.0 * 10.0).round() / 10.0
}

/// Game from `IPlayerService/GetOwnedGames`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedGame {
    pub appid: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Total playtime in minutes
    #[serde(default)]
    pub playtime_forever: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_icon_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_logo_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playtime_windows_forever: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playtime_mac_forever: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playtime_linux_forever: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playtime_2weeks: Option<u32>,
}

impl OwnedGame {
    /// Total playtime in hours, one decimal
    pub fn playtime_hours(&self) -> f64 {
        minutes_to_hours(self.playtime_forever)
    }

    pub fn playtime_2weeks_hours(&self) -> Option<f64> {
        self.playtime_2weeks
            .filter(|m| *m > 0)
            .map(minutes_to_hours)
    }

    pub fn icon_url(&self) -> Option<String> {
        self.img_icon_url
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|hash| format!("{}/{}/{}.jpg", MEDIA_BASE, self.appid, hash))
    }

    pub fn logo_url(&self) -> Option<String> {
        self.img_logo_url
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|hash| format!("{}/{}/{}.jpg", MEDIA_BASE, self.appid, hash))
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("App {}", self.appid))
    }
}

/// Filters for [`get_owned_games`](crate::api::GamesApi::get_owned_games)
#[derive(Debug, Clone)]
pub struct OwnedGamesOptions {
    /// Include names and image hashes
    pub include_appinfo: bool,
    pub include_played_free_games: bool,
    /// Restrict the result to these apps
    pub appids_filter: Vec<u32>,
}

impl Default for OwnedGamesOptions {
    fn default() -> Self {
        Self {
            include_appinfo: true,
            include_played_free_games: false,
            appids_filter: Vec::new(),
        }
    }
}

/// Entry of the full app list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteamApp {
    pub appid: u32,
    pub name: String,
}

/// Player achievement from `GetPlayerAchievements`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub apiname: String,

    pub achieved: u8,

    #[serde(default)]
    pub unlocktime: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Achievement {
    pub fn is_achieved(&self) -> bool {
        self.achieved == 1
    }

    pub fn unlock_date(&self) -> Option<DateTime<Utc>> {
        if self.is_achieved() && self.unlocktime > 0 {
            DateTime::from_timestamp(self.unlocktime, 0)
        } else {
            None
        }
    }
}

/// A player's achievements for one game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerAchievements {
    #[serde(rename = "steamID")]
    pub steam_id: SteamId,

    #[serde(rename = "gameName", default)]
    pub game_name: String,

    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

impl PlayerAchievements {
    pub fn unlocked(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter().filter(|a| a.is_achieved())
    }

    /// Percentage of achievements unlocked, 0 when the game has none
    pub fn completion_percent(&self) -> f64 {
        if self.achievements.is_empty() {
            return 0.0;
        }
        self.unlocked().count() as f64 * 100.0 / self.achievements.len() as f64
    }
}

/// Schema from `ISteamUserStats/GetSchemaForGame`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSchema {
    #[serde(default)]
    pub game_name: String,

    #[serde(default)]
    pub game_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_game_stats: Option<AvailableGameStats>,
}

impl GameSchema {
    pub fn achievements(&self) -> &[SchemaAchievement] {
        self.available_game_stats
            .as_ref()
            .map(|s| s.achievements.as_slice())
            .unwrap_or_default()
    }

    pub fn stats(&self) -> &[SchemaStat] {
        self.available_game_stats
            .as_ref()
            .map(|s| s.stats.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailableGameStats {
    #[serde(default)]
    pub achievements: Vec<SchemaAchievement>,

    #[serde(default)]
    pub stats: Vec<SchemaStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaAchievement {
    pub name: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub icon: String,

    #[serde(default, rename = "icongray")]
    pub icon_gray: String,

    #[serde(default)]
    pub hidden: u8,

    #[serde(default, rename = "defaultvalue")]
    pub default_value: i64,
}

impl SchemaAchievement {
    pub fn is_hidden(&self) -> bool {
        self.hidden == 1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaStat {
    pub name: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default, rename = "defaultvalue")]
    pub default_value: f64,
}

/// Store page data from `api/appdetails`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppDetails {
    #[serde(rename = "type", default)]
    pub app_type: String,

    pub name: String,

    pub steam_appid: u32,

    #[serde(default, deserialize_with = "super::de::u32_from_any")]
    pub required_age: u32,

    #[serde(default)]
    pub is_free: bool,

    #[serde(default)]
    pub short_description: String,

    #[serde(default)]
    pub header_image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default)]
    pub developers: Vec<String>,

    #[serde(default)]
    pub publishers: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_overview: Option<PriceOverview>,

    #[serde(default)]
    pub platforms: BTreeMap<String, bool>,

    #[serde(default)]
    pub categories: Vec<Tag>,

    #[serde(default)]
    pub genres: Vec<Tag>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<ReleaseDate>,
}

impl AppDetails {
    pub fn is_released(&self) -> bool {
        self.release_date.as_ref().is_some_and(|d| !d.coming_soon)
    }

    /// Supported platforms, sorted by name
    pub fn platform_list(&self) -> Vec<&str> {
        self.platforms
            .iter()
            .filter(|(_, supported)| **supported)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceOverview {
    #[serde(default)]
    pub currency: String,

    /// Prices are in cents
    #[serde(default)]
    pub initial: u64,

    #[serde(rename = "final", default)]
    pub final_price: u64,

    #[serde(default)]
    pub discount_percent: u32,

    #[serde(default)]
    pub final_formatted: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    #[serde(deserialize_with = "super::de::string_from_any")]
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseDate {
    #[serde(default)]
    pub coming_soon: bool,

    #[serde(default)]
    pub date: String,
}
