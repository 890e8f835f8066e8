//! Async client for the Steam Web API
//!
//! A [`Session`] owns one HTTP transport and hands out namespaced façades
//! (`player()`, `games()`, `stats()`, `market()`, `family()`). Requests are
//! authenticated with a token when one applies to the endpoint and fall back
//! to the API key otherwise.
//!
//! ```no_run
//! use steamy::{Steam, SteamConfig, SteamId};
//!
//! # async fn run() -> steamy::Result<()> {
//! let config = SteamConfig::new().with_api_key("K");
//! let friends = Steam::with_session(config, async |steam| {
//!     steam.player().get_friends_list(SteamId(76561197960435530)).await
//! })
//! .await?;
//! println!("{} friends", friends.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use auth::{AccessToken, Credentials};
pub use client::{Session, Steam};
pub use config::{Settings, SteamConfig};
pub use error::{ApiError, ConfigError, Error, ErrorKind, Result};
pub use models::SteamId;
