//! Display rows for table and JSON output
//!
//! Each row flattens an API model into the columns the CLI shows.

use serde::Serialize;
use tabled::Tabled;

use steamy::models::{
    Friend, MarketHistoryEntry, NewsItem, OwnedGame, PersonaState, PlayerAchievements, PlayerBan,
    PlayerSummary, PlaytimeEntry, SteamApp,
};

use super::formatters::{format_playtime, format_unix_time, truncate};

fn persona_label(state: PersonaState) -> String {
    match state {
        PersonaState::Offline => "offline".to_string(),
        PersonaState::Online => "online".to_string(),
        PersonaState::Busy => "busy".to_string(),
        PersonaState::Away => "away".to_string(),
        PersonaState::Snooze => "snooze".to_string(),
        PersonaState::LookingToTrade => "looking to trade".to_string(),
        PersonaState::LookingToPlay => "looking to play".to_string(),
        PersonaState::Unknown(code) => format!("unknown ({})", code),
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PlayerDisplay {
    #[tabled(rename = "STEAM ID")]
    pub steam_id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "VISIBILITY")]
    pub visibility: String,

    #[tabled(rename = "PLAYING")]
    pub playing: String,

    #[tabled(rename = "COUNTRY")]
    pub country: String,
}

impl From<PlayerSummary> for PlayerDisplay {
    fn from(player: PlayerSummary) -> Self {
        Self {
            steam_id: player.steamid.to_string(),
            status: persona_label(player.persona_state()),
            visibility: if player.is_public() { "public" } else { "private" }.to_string(),
            playing: player.gameextrainfo.clone().unwrap_or_default(),
            country: player.loccountrycode.clone().unwrap_or_default(),
            name: player.personaname,
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct FriendDisplay {
    #[tabled(rename = "STEAM ID")]
    pub steam_id: String,

    #[tabled(rename = "RELATIONSHIP")]
    pub relationship: String,

    #[tabled(rename = "FRIEND SINCE")]
    pub friend_since: String,
}

impl From<Friend> for FriendDisplay {
    fn from(friend: Friend) -> Self {
        Self {
            steam_id: friend.steamid.to_string(),
            relationship: friend.relationship,
            friend_since: format_unix_time(friend.friend_since.unwrap_or(0)),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct BanDisplay {
    #[tabled(rename = "STEAM ID")]
    pub steam_id: String,

    #[tabled(rename = "VAC")]
    pub vac_bans: u32,

    #[tabled(rename = "GAME")]
    pub game_bans: u32,

    #[tabled(rename = "COMMUNITY")]
    pub community_banned: bool,

    #[tabled(rename = "ECONOMY")]
    pub economy_ban: String,

    #[tabled(rename = "DAYS SINCE")]
    pub days_since_last_ban: u32,
}

impl From<PlayerBan> for BanDisplay {
    fn from(ban: PlayerBan) -> Self {
        Self {
            steam_id: ban.steam_id.to_string(),
            vac_bans: ban.number_of_vac_bans,
            game_bans: ban.number_of_game_bans,
            community_banned: ban.community_banned,
            economy_ban: ban.economy_ban,
            days_since_last_ban: ban.days_since_last_ban,
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct OwnedGameDisplay {
    #[tabled(rename = "APP ID")]
    pub appid: u32,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "PLAYTIME")]
    pub playtime: String,

    #[tabled(rename = "LAST 2 WEEKS")]
    pub recent: String,
}

impl From<OwnedGame> for OwnedGameDisplay {
    fn from(game: OwnedGame) -> Self {
        Self {
            appid: game.appid,
            name: truncate(&game.display_name(), 40),
            playtime: format_playtime(u64::from(game.playtime_forever)),
            recent: format_playtime(u64::from(game.playtime_2weeks.unwrap_or(0))),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AppDisplay {
    #[tabled(rename = "APP ID")]
    pub appid: u32,

    #[tabled(rename = "NAME")]
    pub name: String,
}

impl From<SteamApp> for AppDisplay {
    fn from(app: SteamApp) -> Self {
        Self {
            appid: app.appid,
            name: app.name,
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AchievementDisplay {
    #[tabled(rename = "ACHIEVEMENT")]
    pub name: String,

    #[tabled(rename = "UNLOCKED")]
    pub unlocked: bool,

    #[tabled(rename = "DATE")]
    pub date: String,
}

impl AchievementDisplay {
    pub fn rows(achievements: PlayerAchievements) -> Vec<Self> {
        achievements
            .achievements
            .into_iter()
            .map(|a| Self {
                unlocked: a.is_achieved(),
                date: format_unix_time(a.unlocktime),
                name: a.name.unwrap_or(a.apiname),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct NewsDisplay {
    #[tabled(rename = "DATE")]
    pub date: String,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "FEED")]
    pub feed: String,

    #[tabled(rename = "URL")]
    pub url: String,
}

impl From<NewsItem> for NewsDisplay {
    fn from(item: NewsItem) -> Self {
        Self {
            date: format_unix_time(item.date),
            title: truncate(&item.title, 60),
            feed: item.feedlabel,
            url: item.url,
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PriceHistoryDisplay {
    #[tabled(rename = "DATE")]
    pub date: String,

    #[tabled(rename = "PRICE")]
    pub price: String,

    #[tabled(rename = "VOLUME")]
    pub volume: u64,
}

impl From<MarketHistoryEntry> for PriceHistoryDisplay {
    fn from(entry: MarketHistoryEntry) -> Self {
        Self {
            price: format!("{:.2}", entry.price),
            date: entry.date,
            volume: entry.volume,
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PlaytimeDisplay {
    #[tabled(rename = "STEAM ID")]
    pub steam_id: String,

    #[tabled(rename = "APP ID")]
    pub appid: u32,

    #[tabled(rename = "HOURS")]
    pub hours: String,

    #[tabled(rename = "LAST PLAYED")]
    pub last_played: String,
}

impl From<PlaytimeEntry> for PlaytimeDisplay {
    fn from(entry: PlaytimeEntry) -> Self {
        Self {
            steam_id: entry.steamid.to_string(),
            appid: entry.appid,
            hours: format!("{:.1}", entry.hours_played()),
            last_played: format_unix_time(entry.latest_played),
        }
    }
}

/// Generic two-column row for key/value views
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct FieldDisplay {
    #[tabled(rename = "FIELD")]
    pub field: String,

    #[tabled(rename = "VALUE")]
    pub value: String,
}

impl FieldDisplay {
    pub fn new(field: &str, value: impl ToString) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}
