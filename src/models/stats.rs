//! Statistics and news models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SteamId;

/// Aggregated stat across all players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalStat {
    pub name: String,
    pub total: f64,
}

/// A player's value for one stat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStat {
    pub name: String,

    #[serde(deserialize_with = "super::de::f64_from_any")]
    pub value: f64,
}

/// Achievement state from `GetUserStatsForGame`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAchievement {
    pub name: String,

    pub achieved: u8,

    #[serde(default)]
    pub unlocktime: i64,
}

impl UserAchievement {
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

/// `playerstats` block of `GetUserStatsForGame`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(rename = "steamID")]
    pub steam_id: SteamId,

    #[serde(rename = "gameName", default)]
    pub game_name: String,

    #[serde(default)]
    pub stats: Vec<UserStat>,

    #[serde(default)]
    pub achievements: Vec<UserAchievement>,
}

impl UserStats {
    pub fn stat(&self, name: &str) -> Option<f64> {
        self.stats.iter().find(|s| s.name == name).map(|s| s.value)
    }
}

/// Share of players holding an achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalAchievementStat {
    pub name: String,

    #[serde(deserialize_with = "super::de::f64_from_any")]
    pub percent: f64,
}

impl GlobalAchievementStat {
    /// Percentage as a fraction between 0 and 1
    pub fn completion_rate(&self) -> f64 {
        self.percent / 100.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerCount {
    #[serde(default)]
    pub player_count: u64,
    pub result: i32,
}

impl PlayerCount {
    pub fn is_success(&self) -> bool {
        self.result == 1
    }
}

/// Article from `ISteamNews/GetNewsForApp`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub gid: String,

    pub title: String,

    pub url: String,

    #[serde(default)]
    pub is_external_url: bool,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub contents: String,

    #[serde(default)]
    pub feedlabel: String,

    /// Unix timestamp
    pub date: i64,

    #[serde(default)]
    pub feedname: String,

    #[serde(default)]
    pub feed_type: i32,

    pub appid: u32,
}

impl NewsItem {
    pub fn publish_date(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }

    /// Published through Steam's own feed
    pub fn is_official(&self) -> bool {
        self.feed_type == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_achievement_percent_as_string() {
        let stat: GlobalAchievementStat =
            serde_json::from_str(r#"{"name": "TF_PLAY_GAME_EVERYCLASS", "percent": "57.5"}"#)
                .unwrap();
        assert_eq!(stat.percent, 57.5);
        assert_eq!(stat.completion_rate(), 0.575);
    }

    #[test]
    fn test_user_stats_lookup() {
        let stats: UserStats = serde_json::from_str(
            r#"{"steamID": "76561197960435530", "gameName": "TF2",
                "stats": [{"name": "kills", "value": 12}],
                "achievements": [{"name": "A", "achieved": 1}]}"#,
        )
        .unwrap();

        assert_eq!(stats.stat("kills"), Some(12.0));
        assert_eq!(stats.stat("deaths"), None);
        assert!(stats.achievements[0].is_achieved());
        assert!(stats.achievements[0].unlock_date().is_none());
    }

    #[test]
    fn test_news_item_flags() {
        let item: NewsItem = serde_json::from_str(
            r#"{"gid": "1", "title": "Patch", "url": "https://x", "date": 1700000000,
                "feed_type": 1, "appid": 440}"#,
        )
        .unwrap();
        assert!(item.is_official());
        assert_eq!(item.publish_date().unwrap().timestamp(), 1_700_000_000);
    }
}
