//! `ISteamUser` operations

use log::debug;
use serde_json::Value;

use super::{MAX_IDS_PER_REQUEST, decode, take_field};
use crate::client::parallel::fetch_in_chunks;
use crate::client::{ApiRequest, Endpoint, RequestDispatch};
use crate::error::{ApiError, Error, Result};
use crate::models::{Friend, PlayerBan, PlayerSummary, SteamId, VanityUrlResolution};

/// Chunk requests kept in flight by [`PlayerApi::get_player_summaries_all`]
const MAX_CONCURRENT_CHUNKS: usize = 4;

const INTERFACE: &str = "ISteamUser";

/// Player profile operations
#[derive(Clone, Copy)]
pub struct PlayerApi<'a> {
    client: &'a dyn RequestDispatch,
}

impl<'a> PlayerApi<'a> {
    pub fn new(client: &'a dyn RequestDispatch) -> Self {
        Self { client }
    }

    /// Summaries for up to 100 players.
    pub async fn get_player_summaries(&self, steam_ids: &[SteamId]) -> Result<Vec<PlayerSummary>> {
        check_id_count(steam_ids)?;
        if steam_ids.is_empty() {
            return Ok(Vec::new());
        }

        let request = ApiRequest::new(Endpoint::web_api(INTERFACE, "GetPlayerSummaries", 2))
            .param("steamids", SteamId::join(steam_ids));

        let mut body = self.client.dispatch(request).await?;
        let mut response = take_field(&mut body, "response", "GetPlayerSummaries")?;
        let players = response.get_mut("players").map(Value::take).unwrap_or_default();
        if players.is_null() {
            return Ok(Vec::new());
        }
        decode(players, "GetPlayerSummaries")
    }

    /// Summary for one player, `None` if Steam returns nothing.
    pub async fn get_player_summary(&self, steam_id: SteamId) -> Result<Option<PlayerSummary>> {
        Ok(self
            .get_player_summaries(&[steam_id])
            .await?
            .into_iter()
            .next())
    }

    /// Summaries for any number of players, fetched 100 at a time.
    pub async fn get_player_summaries_all(
        &self,
        steam_ids: &[SteamId],
    ) -> Result<Vec<PlayerSummary>> {
        let api = *self;
        fetch_in_chunks(
            steam_ids.to_vec(),
            MAX_IDS_PER_REQUEST,
            MAX_CONCURRENT_CHUNKS,
            move |chunk| async move { api.get_player_summaries(&chunk).await },
        )
        .await
    }

    /// Friends of `steam_id`.
    ///
    /// Steam omits `friendslist` entirely when the friend list is hidden; that
    /// is reported as a private profile.
    pub async fn get_friends_list(&self, steam_id: SteamId) -> Result<Vec<Friend>> {
        let request = ApiRequest::new(Endpoint::web_api(INTERFACE, "GetFriendList", 1))
            .param("steamid", steam_id)
            .param("relationship", "friend");

        let mut body = self.client.dispatch(request).await?;
        let Some(list) = body.get_mut("friendslist").map(Value::take) else {
            debug!("No friendslist for {}, treating profile as private", steam_id);
            return Err(ApiError::PrivateProfile(steam_id.to_string()).into());
        };

        match list.get("friends") {
            Some(friends) => decode(friends.clone(), "GetFriendList"),
            None => Ok(Vec::new()),
        }
    }

    /// Ban records for up to 100 players.
    pub async fn get_player_bans(&self, steam_ids: &[SteamId]) -> Result<Vec<PlayerBan>> {
        check_id_count(steam_ids)?;
        if steam_ids.is_empty() {
            return Ok(Vec::new());
        }

        let request = ApiRequest::new(Endpoint::web_api(INTERFACE, "GetPlayerBans", 1))
            .param("steamids", SteamId::join(steam_ids));

        let mut body = self.client.dispatch(request).await?;
        let players = take_field(&mut body, "players", "GetPlayerBans")?;
        decode(players, "GetPlayerBans")
    }

    /// Resolve a vanity name (or a profile URL ending in one) to a Steam ID.
    pub async fn resolve_vanity_url(&self, vanity: &str) -> Result<Option<SteamId>> {
        let name = vanity
            .trim()
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        if name.is_empty() {
            return Err(Error::InvalidInput("Vanity URL cannot be empty".to_string()));
        }

        let request = ApiRequest::new(Endpoint::web_api(INTERFACE, "ResolveVanityURL", 1))
            .param("vanityurl", name)
            .param("url_type", 1);

        let mut body = self.client.dispatch(request).await?;
        let response = take_field(&mut body, "response", "ResolveVanityURL")?;
        let resolution: VanityUrlResolution = decode(response, "ResolveVanityURL")?;

        if resolution.is_success() {
            Ok(resolution.steamid)
        } else {
            debug!(
                "Vanity URL '{}' did not resolve: {}",
                name,
                resolution.message.as_deref().unwrap_or("no match")
            );
            Ok(None)
        }
    }
}

fn check_id_count(steam_ids: &[SteamId]) -> Result<()> {
    if steam_ids.len() > MAX_IDS_PER_REQUEST {
        return Err(Error::InvalidInput(format!(
            "At most {} Steam IDs are allowed per request, got {}",
            MAX_IDS_PER_REQUEST,
            steam_ids.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockDispatcher;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn summary(id: u64) -> Value {
        json!({"steamid": id.to_string(), "personaname": format!("p{}", id)})
    }

    #[tokio::test]
    async fn test_friends_list_request_and_parse() {
        let mock = MockDispatcher::new()
            .with_response(
                "ISteamUser/GetFriendList",
                json!({"friendslist": {"friends": [
                    {"steamid": "76561197960265731", "relationship": "friend", "friend_since": 0},
                    {"steamid": "76561197960265738", "relationship": "friend", "friend_since": 1600000000}
                ]}}),
            )
            .await;

        let friends = PlayerApi::new(&mock)
            .get_friends_list(SteamId(1234567890))
            .await
            .unwrap();

        assert_eq!(friends.len(), 2);
        assert_eq!(friends[0].steamid, SteamId(76561197960265731));

        let request = mock.single_request().await;
        assert_eq!(request.endpoint, "ISteamUser/GetFriendList");
        assert_eq!(request.param("steamid"), Some("1234567890"));
        assert_eq!(request.param("relationship"), Some("friend"));
    }

    #[tokio::test]
    async fn test_missing_friendslist_is_private_profile() {
        let mock = MockDispatcher::new()
            .with_response("ISteamUser/GetFriendList", json!({}))
            .await;

        let err = PlayerApi::new(&mock)
            .get_friends_list(SteamId(1))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PrivateProfile);
    }

    #[tokio::test]
    async fn test_malformed_friend_entries() {
        let mock = MockDispatcher::new()
            .with_response(
                "ISteamUser/GetFriendList",
                json!({"friendslist": {"friends": "nope"}}),
            )
            .await;

        let err = PlayerApi::new(&mock)
            .get_friends_list(SteamId(1))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseFormat);
    }

    #[tokio::test]
    async fn test_too_many_ids_rejected_without_request() {
        let mock = MockDispatcher::new();
        let ids: Vec<SteamId> = (0..101).map(SteamId).collect();

        let err = PlayerApi::new(&mock)
            .get_player_summaries(&ids)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(mock.captured_requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_player_summary_single() {
        let mock = MockDispatcher::new()
            .with_response(
                "ISteamUser/GetPlayerSummaries",
                json!({"response": {"players": [summary(76561197960435530)]}}),
            )
            .await;

        let player = PlayerApi::new(&mock)
            .get_player_summary(SteamId(76561197960435530))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(player.personaname, "p76561197960435530");

        let request = mock.single_request().await;
        assert_eq!(request.param("steamids"), Some("76561197960435530"));
    }

    #[tokio::test]
    async fn test_player_summary_empty_players() {
        let mock = MockDispatcher::new()
            .with_response("ISteamUser/GetPlayerSummaries", json!({"response": {}}))
            .await;

        let player = PlayerApi::new(&mock)
            .get_player_summary(SteamId(5))
            .await
            .unwrap();
        assert!(player.is_none());
    }

    #[tokio::test]
    async fn test_summaries_all_chunks_by_hundred() {
        let mock = MockDispatcher::new()
            .with_response(
                "ISteamUser/GetPlayerSummaries",
                json!({"response": {"players": [summary(1)]}}),
            )
            .await;
        let ids: Vec<SteamId> = (1..=250).map(SteamId).collect();

        let players = PlayerApi::new(&mock)
            .get_player_summaries_all(&ids)
            .await
            .unwrap();

        let requests = mock.captured_requests().await;
        assert_eq!(requests.len(), 3);
        assert_eq!(players.len(), 3);

        let mut counts: Vec<usize> = requests
            .iter()
            .map(|r| r.param("steamids").unwrap().split(',').count())
            .collect();
        counts.sort();
        assert_eq!(counts, vec![50, 100, 100]);
    }

    #[tokio::test]
    async fn test_player_bans() {
        let mock = MockDispatcher::new()
            .with_response(
                "ISteamUser/GetPlayerBans",
                json!({"players": [{
                    "SteamId": "76561197960435530",
                    "CommunityBanned": false,
                    "VACBanned": false,
                    "NumberOfVACBans": 0,
                    "DaysSinceLastBan": 0,
                    "NumberOfGameBans": 0,
                    "EconomyBan": "none"
                }]}),
            )
            .await;

        let bans = PlayerApi::new(&mock)
            .get_player_bans(&[SteamId(76561197960435530)])
            .await
            .unwrap();
        assert_eq!(bans.len(), 1);
        assert!(!bans[0].is_banned());
    }

    #[tokio::test]
    async fn test_resolve_vanity_url_from_profile_url() {
        let mock = MockDispatcher::new()
            .with_response(
                "ISteamUser/ResolveVanityURL",
                json!({"response": {"steamid": "76561197960287930", "success": 1}}),
            )
            .await;

        let id = PlayerApi::new(&mock)
            .resolve_vanity_url("https://steamcommunity.com/id/gabelogannewell/")
            .await
            .unwrap();
        assert_eq!(id, Some(SteamId(76561197960287930)));

        let request = mock.single_request().await;
        assert_eq!(request.param("vanityurl"), Some("gabelogannewell"));
        assert_eq!(request.param("url_type"), Some("1"));
    }

    #[tokio::test]
    async fn test_resolve_vanity_url_no_match() {
        let mock = MockDispatcher::new()
            .with_response(
                "ISteamUser/ResolveVanityURL",
                json!({"response": {"success": 42, "message": "No match"}}),
            )
            .await;

        let id = PlayerApi::new(&mock)
            .resolve_vanity_url("nobody-here")
            .await
            .unwrap();
        assert!(id.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_error_propagates() {
        let mock = MockDispatcher::new()
            .with_error(ApiError::Unauthorized)
            .await;

        let err = PlayerApi::new(&mock)
            .get_player_bans(&[SteamId(1)])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
    }
}
