//! `ISteamUserStats` and `ISteamNews` operations

use serde_json::Value;

use super::{decode, missing, validate_app_id};
use crate::client::{ApiRequest, Endpoint, RequestDispatch};
use crate::error::{ApiError, Error, Result};
use crate::models::de::value_as_f64;
use crate::models::{
    GlobalAchievementStat, GlobalStat, NewsItem, PlayerCount, SteamId, UserAchievement, UserStat,
    UserStats,
};

/// Steam caps news requests at this many items
pub const MAX_NEWS_ITEMS: u32 = 20;

const USER_STATS: &str = "ISteamUserStats";

/// Stats, player count and news operations
#[derive(Clone, Copy)]
pub struct StatsApi<'a> {
    client: &'a dyn RequestDispatch,
}

impl<'a> StatsApi<'a> {
    pub fn new(client: &'a dyn RequestDispatch) -> Self {
        Self { client }
    }

    /// Totals of the named stats across all players.
    ///
    /// `start` and `end` are Unix timestamps bounding the aggregation window.
    pub async fn get_global_stats_for_game(
        &self,
        app_id: u32,
        names: &[&str],
        start: Option<i64>,
        end: Option<i64>,
    ) -> Result<Vec<GlobalStat>> {
        validate_app_id(app_id)?;
        if names.is_empty() {
            return Err(Error::InvalidInput(
                "At least one stat name must be provided".to_string(),
            ));
        }

        let mut request = ApiRequest::new(Endpoint::web_api(USER_STATS, "GetGlobalStatsForGame", 1))
            .param("appid", app_id)
            .param("count", names.len());
        for (i, name) in names.iter().enumerate() {
            request = request.param(&format!("name[{}]", i), name);
        }
        let request = request.opt_param("startdate", start).opt_param("enddate", end);

        let mut body = self.client.dispatch(request).await?;
        let Some(response) = body.get_mut("response").map(Value::take) else {
            return Err(ApiError::NotFound(format!("App {} has no global stats", app_id)).into());
        };

        if response.get("result").and_then(Value::as_i64) != Some(1) {
            return Err(
                ApiError::NotFound(format!("Global stats for app {} are unavailable", app_id))
                    .into(),
            );
        }

        let Some(stats) = response.get("globalstats").and_then(Value::as_object) else {
            return Err(missing("globalstats", "GetGlobalStatsForGame"));
        };

        stats
            .iter()
            .map(|(name, raw)| {
                // Either a bare number or {"total": "123"}
                let total = raw.get("total").unwrap_or(raw);
                value_as_f64(total)
                    .map(|total| GlobalStat {
                        name: name.clone(),
                        total,
                    })
                    .ok_or_else(|| {
                        Error::from(ApiError::InvalidResponse(format!(
                            "Non-numeric total for stat '{}'",
                            name
                        )))
                    })
            })
            .collect()
    }

    /// A player's stats and achievements for one game.
    pub async fn get_user_stats_for_game(&self, steam_id: SteamId, app_id: u32) -> Result<UserStats> {
        validate_app_id(app_id)?;

        let request = ApiRequest::new(Endpoint::web_api(USER_STATS, "GetUserStatsForGame", 2))
            .param("steamid", steam_id)
            .param("appid", app_id);

        let mut body = self.client.dispatch(request).await?;
        let Some(stats) = body.get_mut("playerstats").map(Value::take) else {
            return Err(ApiError::NotFound(format!(
                "No stats for player {} in app {}",
                steam_id, app_id
            ))
            .into());
        };

        if let Some(message) = stats.get("error").and_then(Value::as_str) {
            let lower = message.to_lowercase();
            return Err(if lower.contains("private") {
                ApiError::PrivateProfile(steam_id.to_string())
            } else if lower.contains("not found") {
                ApiError::NotFound(format!("App {}", app_id))
            } else {
                ApiError::Steam(message.to_string())
            }
            .into());
        }

        decode(stats, "GetUserStatsForGame")
    }

    pub async fn get_user_achievements_only(
        &self,
        steam_id: SteamId,
        app_id: u32,
    ) -> Result<Vec<UserAchievement>> {
        Ok(self.get_user_stats_for_game(steam_id, app_id).await?.achievements)
    }

    pub async fn get_user_stats_only(&self, steam_id: SteamId, app_id: u32) -> Result<Vec<UserStat>> {
        Ok(self.get_user_stats_for_game(steam_id, app_id).await?.stats)
    }

    /// Share of players holding each achievement.
    pub async fn get_global_achievement_percentages(
        &self,
        app_id: u32,
    ) -> Result<Vec<GlobalAchievementStat>> {
        validate_app_id(app_id)?;

        let request = ApiRequest::new(Endpoint::web_api(
            USER_STATS,
            "GetGlobalAchievementPercentagesForApp",
            2,
        ))
        .param("gameid", app_id);

        let mut body = self.client.dispatch(request).await?;
        let Some(mut percentages) = body.get_mut("achievementpercentages").map(Value::take) else {
            return Err(ApiError::NotFound(format!("App {} has no achievements", app_id)).into());
        };

        match percentages.get_mut("achievements").map(Value::take) {
            Some(list) => decode(list, "GetGlobalAchievementPercentagesForApp"),
            None => Ok(Vec::new()),
        }
    }

    /// Players in game right now.
    pub async fn get_current_players(&self, app_id: u32) -> Result<PlayerCount> {
        validate_app_id(app_id)?;

        let request = ApiRequest::new(Endpoint::web_api(USER_STATS, "GetNumberOfCurrentPlayers", 1))
            .param("appid", app_id);

        let mut body = self.client.dispatch(request).await?;
        let Some(response) = body.get_mut("response").map(Value::take) else {
            return Err(ApiError::NotFound(format!("App {}", app_id)).into());
        };

        let count: PlayerCount = decode(response, "GetNumberOfCurrentPlayers")?;
        if !count.is_success() {
            return Err(
                ApiError::NotFound(format!("No player count for app {}", app_id)).into(),
            );
        }
        Ok(count)
    }

    /// Latest news for an app. `count` is capped at [`MAX_NEWS_ITEMS`].
    pub async fn get_news_for_app(
        &self,
        app_id: u32,
        count: u32,
        max_length: Option<u32>,
    ) -> Result<Vec<NewsItem>> {
        validate_app_id(app_id)?;

        let request = ApiRequest::new(Endpoint::web_api("ISteamNews", "GetNewsForApp", 2))
            .param("appid", app_id)
            .param("count", count.min(MAX_NEWS_ITEMS))
            .opt_param("maxlength", max_length);

        let mut body = self.client.dispatch(request).await?;
        let Some(mut news) = body.get_mut("appnews").map(Value::take) else {
            return Ok(Vec::new());
        };

        match news.get_mut("newsitems").map(Value::take) {
            Some(items) => decode(items, "GetNewsForApp"),
            None => Ok(Vec::new()),
        }
    }
}
