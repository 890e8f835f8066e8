//! Scoped Steam sessions
//!
//! ```ignore
//! let config = SteamConfig::new().with_api_key("K");
//! let friends = Steam::with_session(config, async |steam| {
//!     steam.player().get_friends_list(SteamId(1234567890)).await
//! })
//! .await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::StatusCode;
use serde_json::Value;

use super::{ApiRequest, Endpoint, RequestDispatch, Transport};
use crate::api::{FamilyApi, GamesApi, MarketApi, PlayerApi, StatsApi};
use crate::auth::{Credentials, resolve_credential};
use crate::config::{Settings, SteamConfig};
use crate::error::{ApiError, Error, Result};

/// Entry point for opening sessions.
pub struct Steam;

impl Steam {
    /// Open a session. The caller must [`close`](Session::close) it or let it
    /// drop.
    pub fn connect(config: SteamConfig) -> Result<Session> {
        Session::open(config)
    }

    /// Run `body` with a fresh session and release the transport afterwards.
    ///
    /// The transport is released when `body` returns `Ok` or `Err`, and also
    /// when the returned future is dropped before completion.
    pub async fn with_session<T, F>(config: SteamConfig, body: F) -> Result<T>
    where
        F: AsyncFnOnce(&Session) -> Result<T>,
    {
        let session = Session::open(config)?;
        let outcome = body(&session).await;
        session.close();
        outcome
    }
}

/// A live connection to Steam
pub struct Session {
    credentials: Credentials,
    settings: Settings,
    transport: Arc<Transport>,
}

impl Session {
    fn open(config: SteamConfig) -> Result<Self> {
        config.validate()?;
        let transport = Transport::open(&config.settings)?;
        Ok(Self {
            credentials: config.credentials(),
            settings: config.settings,
            transport: Arc::new(transport),
        })
    }

    pub fn player(&self) -> PlayerApi<'_> {
        PlayerApi::new(self)
    }

    pub fn games(&self) -> GamesApi<'_> {
        GamesApi::new(self)
    }

    pub fn stats(&self) -> StatsApi<'_> {
        StatsApi::new(self)
    }

    pub fn market(&self) -> MarketApi<'_> {
        MarketApi::new(self)
    }

    pub fn family(&self) -> FamilyApi<'_> {
        FamilyApi::new(self)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Shared handle to the transport, mostly for inspecting its lifecycle.
    pub fn transport(&self) -> Arc<Transport> {
        Arc::clone(&self.transport)
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_open()
    }

    /// Release the transport now.
    pub fn close(self) {
        // Drop does the work; it is a no-op if already released.
        drop(self)
    }

    /// Whether a cheap authenticated call succeeds.
    pub async fn test_connection(&self) -> bool {
        let request = ApiRequest::new(Endpoint::web_api("ISteamApps", "GetAppList", 2));
        match self.send(request).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Connection test failed: {}", e);
                false
            }
        }
    }

    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let ApiRequest { endpoint, mut params } = request;
        let name = endpoint.name();

        // Fails before any network activity when a required credential is missing
        let credential = resolve_credential(&self.credentials, &endpoint.auth, &name)?;
        let http = self.transport.client()?;

        if let Some((key, value)) = credential.query_param() {
            params.push((key.to_string(), value.to_string()));
        }

        debug!(
            "{} {} ({}, {} params)",
            endpoint.method,
            name,
            credential.label(),
            params.len()
        );

        let response = http
            .request(endpoint.method.clone(), endpoint.url(&self.settings))
            .query(&params)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            status if status.is_success() => {
                let body = response.text().await.map_err(ApiError::from)?;
                serde_json::from_str::<Value>(&body).map_err(|e| {
                    Error::from(ApiError::InvalidResponse(format!(
                        "{} returned a non-JSON body: {}",
                        name, e
                    )))
                })
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(name).into()),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                warn!("{} rate limited, retry after {}s", name, retry_after);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(format!("{}: {}", name, error_msg)).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(format!("{}: {}", name, error_msg)).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code {} from {}", status, name);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.transport.release();
    }
}

#[async_trait]
impl RequestDispatch for Session {
    async fn dispatch(&self, request: ApiRequest) -> Result<Value> {
        self.send(request).await
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &self.credentials)
            .field("transport", &self.transport)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::SteamId;
    use mockito::{Matcher, Server};

    fn config_for(server: &Server) -> SteamConfig {
        SteamConfig::new().with_base_url(server.url())
    }

    #[tokio::test]
    async fn test_with_session_releases_on_ok_and_err() {
        let server = Server::new_async().await;

        let mut seen = None;
        let out = Steam::with_session(config_for(&server), async |steam: &Session| {
            seen = Some(steam.transport());
            Ok(7)
        })
        .await
        .unwrap();
        assert_eq!(out, 7);
        let transport = seen.take().unwrap();
        assert_eq!(transport.release_count(), 1);
        assert!(!transport.is_open());

        let result: Result<()> = Steam::with_session(config_for(&server), async |steam: &Session| {
            seen = Some(steam.transport());
            Err(Error::InvalidInput("boom".to_string()))
        })
        .await;
        assert!(result.is_err());
        assert_eq!(seen.unwrap().release_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_config_never_opens() {
        let mut config = SteamConfig::new();
        config.settings.request_timeout_secs = 0;
        let err = Steam::connect(config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_request_after_close_is_transport_error() {
        let server = Server::new_async().await;
        let session = Steam::connect(config_for(&server).with_api_key("K")).unwrap();
        let transport = session.transport();
        transport.release();

        let err = session
            .player()
            .get_friends_list(SteamId(1))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);

        session.close();
        assert_eq!(transport.release_count(), 1);
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let mut server = Server::new_async().await;
        let config = config_for(&server).with_api_key("K");

        let _m401 = server
            .mock("GET", "/ISteamApps/GetAppList/v2/")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;
        let _m429 = server
            .mock("GET", "/ISteamNews/GetNewsForApp/v2/")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_header("retry-after", "12")
            .create_async()
            .await;
        let _m500 = server
            .mock("GET", "/ISteamUserStats/GetNumberOfCurrentPlayers/v1/")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("down")
            .create_async()
            .await;

        let session = Steam::connect(config).unwrap();

        let err = session.games().get_app_list().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);

        let err = session.stats().get_news_for_app(440, 5, None).await.unwrap_err();
        match err {
            Error::Api(ApiError::RateLimit(wait)) => assert_eq!(wait, Duration::from_secs(12)),
            other => panic!("Expected RateLimit, got {:?}", other),
        }

        let err = session.stats().get_current_players(440).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert!(err.to_string().contains("down"));

        assert!(!session.test_connection().await);
    }

    #[tokio::test]
    async fn test_user_agent_and_token_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/ISteamApps/GetAppList/v2/")
            .match_query(Matcher::UrlEncoded("access_token".into(), "T".into()))
            .match_header("user-agent", Matcher::Regex("^steamy/".into()))
            .with_body(r#"{"applist": {"apps": []}}"#)
            .expect(1)
            .create_async()
            .await;

        let session = Steam::connect(config_for(&server).with_store_token("T")).unwrap();
        assert!(session.test_connection().await);
        mock.assert_async().await;
    }
}
