//! Library, app list, achievement and store operations

use log::debug;
use serde_json::Value;

use super::{decode, missing, take_field, validate_app_id};
use crate::client::{ApiRequest, Endpoint, RequestDispatch};
use crate::error::{ApiError, Result};
use crate::models::{
    AppDetails, GameSchema, OwnedGame, OwnedGamesOptions, PlayerAchievements, SteamApp, SteamId,
};

/// Game library and catalogue operations
#[derive(Clone, Copy)]
pub struct GamesApi<'a> {
    client: &'a dyn RequestDispatch,
}

impl<'a> GamesApi<'a> {
    pub fn new(client: &'a dyn RequestDispatch) -> Self {
        Self { client }
    }

    /// Games owned by `steam_id`.
    ///
    /// An empty `response` object means the library is hidden.
    pub async fn get_owned_games(
        &self,
        steam_id: SteamId,
        options: &OwnedGamesOptions,
    ) -> Result<Vec<OwnedGame>> {
        let mut request = ApiRequest::new(Endpoint::web_api("IPlayerService", "GetOwnedGames", 1))
            .param("steamid", steam_id)
            .flag("include_appinfo", options.include_appinfo)
            .flag("include_played_free_games", options.include_played_free_games);

        for (i, app_id) in options.appids_filter.iter().enumerate() {
            request = request.param(&format!("appids_filter[{}]", i), app_id);
        }

        let mut body = self.client.dispatch(request).await?;
        let mut response = take_field(&mut body, "response", "GetOwnedGames")?;

        if response.as_object().is_none_or(|o| o.is_empty()) {
            return Err(ApiError::PrivateProfile(steam_id.to_string()).into());
        }

        match response.get_mut("games").map(Value::take) {
            Some(games) => decode(games, "GetOwnedGames"),
            None => Ok(Vec::new()),
        }
    }

    /// Every app on Steam.
    pub async fn get_app_list(&self) -> Result<Vec<SteamApp>> {
        let request = ApiRequest::new(Endpoint::web_api("ISteamApps", "GetAppList", 2));

        let mut body = self.client.dispatch(request).await?;
        let mut applist = take_field(&mut body, "applist", "GetAppList")?;
        let apps = take_field(&mut applist, "apps", "GetAppList")?;
        decode(apps, "GetAppList")
    }

    /// A player's achievements for one game.
    ///
    /// Steam reports failures inside `playerstats` with `success: false`;
    /// the error text decides whether this is a private profile, an unknown
    /// game, or some other rejection.
    pub async fn get_player_achievements(
        &self,
        steam_id: SteamId,
        app_id: u32,
        language: &str,
    ) -> Result<PlayerAchievements> {
        validate_app_id(app_id)?;

        let request = ApiRequest::new(Endpoint::web_api(
            "ISteamUserStats",
            "GetPlayerAchievements",
            1,
        ))
        .param("steamid", steam_id)
        .param("appid", app_id)
        .param("l", language);

        let mut body = self.client.dispatch(request).await?;
        let stats = take_field(&mut body, "playerstats", "GetPlayerAchievements")?;

        if !stats.get("success").and_then(Value::as_bool).unwrap_or(false) {
            let error = stats
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error");
            let lower = error.to_lowercase();

            return Err(if lower.contains("profile is private") {
                ApiError::PrivateProfile(steam_id.to_string())
            } else if lower.contains("invalid appid") || lower.contains("not found") {
                ApiError::NotFound(format!("App {}", app_id))
            } else {
                ApiError::Steam(error.to_string())
            }
            .into());
        }

        decode(stats, "GetPlayerAchievements")
    }

    /// Achievement and stat definitions for a game.
    pub async fn get_schema_for_game(&self, app_id: u32, language: &str) -> Result<GameSchema> {
        validate_app_id(app_id)?;

        let request = ApiRequest::new(Endpoint::web_api("ISteamUserStats", "GetSchemaForGame", 2))
            .param("appid", app_id)
            .param("l", language);

        let mut body = self.client.dispatch(request).await?;
        match body.get_mut("game").map(Value::take) {
            Some(game) if game.as_object().is_some_and(|o| !o.is_empty()) => {
                decode(game, "GetSchemaForGame")
            }
            _ => Err(ApiError::NotFound(format!("App {} has no stats schema", app_id)).into()),
        }
    }

    /// Store page details; `None` when the store has no page for the app.
    pub async fn get_app_details(
        &self,
        app_id: u32,
        country: &str,
        language: &str,
    ) -> Result<Option<AppDetails>> {
        validate_app_id(app_id)?;

        let request = ApiRequest::new(Endpoint::store("api/appdetails"))
            .param("appids", app_id)
            .param("cc", country)
            .param("l", language);

        let mut body = self.client.dispatch(request).await?;
        let Some(mut entry) = body.get_mut(app_id.to_string()).map(Value::take) else {
            debug!("Store returned no entry for app {}", app_id);
            return Ok(None);
        };

        if !entry.get("success").and_then(Value::as_bool).unwrap_or(false) {
            return Ok(None);
        }

        let data = entry
            .get_mut("data")
            .map(Value::take)
            .ok_or_else(|| missing("data", "appdetails"))?;
        decode(data, "appdetails").map(Some)
    }

    /// Case-insensitive substring search over app names.
    ///
    /// Searches `owned` when given, otherwise downloads the full app list.
    pub async fn search_games(
        &self,
        term: &str,
        owned: Option<&[OwnedGame]>,
    ) -> Result<Vec<SteamApp>> {
        let needle = term.trim().to_lowercase();

        if let Some(games) = owned {
            return Ok(games
                .iter()
                .filter_map(|g| {
                    g.name
                        .as_ref()
                        .filter(|name| name.to_lowercase().contains(&needle))
                        .map(|name| SteamApp {
                            appid: g.appid,
                            name: name.clone(),
                        })
                })
                .collect());
        }

        Ok(self
            .get_app_list()
            .await?
            .into_iter()
            .filter(|app| app.name.to_lowercase().contains(&needle))
            .collect())
    }
}
