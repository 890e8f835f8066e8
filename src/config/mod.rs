//! Configuration for steamy sessions
//!
//! A [`SteamConfig`] carries the credential set plus transport settings. It can
//! be built in code, loaded from `~/.steamy/config.yaml`, and overlaid with
//! environment variables.

use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::auth::{AccessToken, Credentials};
use crate::error::{ConfigError, Result};

/// Default Steam Web API host
pub const DEFAULT_API_BASE_URL: &str = "https://api.steampowered.com";

/// Default Steam store host
pub const DEFAULT_STORE_BASE_URL: &str = "https://store.steampowered.com";

/// Default Steam community host
pub const DEFAULT_COMMUNITY_BASE_URL: &str = "https://steamcommunity.com";

/// Environment variable holding the Web API key
pub const ENV_API_KEY: &str = "STEAM_API_KEY";

/// Environment variable holding the store token
pub const ENV_STORE_TOKEN: &str = "STEAM_STORE_TOKEN";

/// Older name for the store token, still honoured
pub const ENV_ACCESS_TOKEN: &str = "STEAM_ACCESS_TOKEN";

/// Environment variable holding the community token
pub const ENV_COMMUNITY_TOKEN: &str = "STEAM_COMMUNITY_TOKEN";

/// Session configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SteamConfig {
    /// Steam Web API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Store `webapi_token`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_token: Option<String>,

    /// Community `loyalty_webapi_token`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_token: Option<String>,

    /// Transport settings
    #[serde(default)]
    pub settings: Settings,
}

/// Transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_store_base_url")]
    pub store_base_url: String,

    #[serde(default = "default_community_base_url")]
    pub community_base_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_store_base_url() -> String {
    DEFAULT_STORE_BASE_URL.to_string()
}

fn default_community_base_url() -> String {
    DEFAULT_COMMUNITY_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("steamy/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            store_base_url: default_store_base_url(),
            community_base_url: default_community_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl SteamConfig {
    /// Empty configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_store_token(mut self, token: impl Into<String>) -> Self {
        self.store_token = Some(token.into());
        self
    }

    pub fn with_community_token(mut self, token: impl Into<String>) -> Self {
        self.community_token = Some(token.into());
        self
    }

    /// Store token taken from the store's async config JSON.
    pub fn with_store_token_payload(self, payload: &str) -> Result<Self> {
        let token = AccessToken::from_async_config(payload)?;
        Ok(self.with_store_token(token.as_str()))
    }

    /// Community token taken from the quoted `data-loyalty_webapi_token` attribute.
    pub fn with_community_token_payload(self, encoded: &str) -> Result<Self> {
        let token = AccessToken::from_loyalty_config(encoded)?;
        Ok(self.with_community_token(token.as_str()))
    }

    /// Point all three hosts at one base URL (used against mock servers).
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.settings.api_base_url = base.clone();
        self.settings.store_base_url = base.clone();
        self.settings.community_base_url = base;
        self
    }

    /// Configuration read from the process environment only.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|name| std::env::var(name).ok());
        config
    }

    /// Overlay credentials from an environment lookup.
    ///
    /// Set variables replace values from the file. `STEAM_STORE_TOKEN`
    /// takes priority over `STEAM_ACCESS_TOKEN`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(token) = get(ENV_STORE_TOKEN).or_else(|| get(ENV_ACCESS_TOKEN)) {
            self.store_token = Some(token);
        }
        if let Some(token) = get(ENV_COMMUNITY_TOKEN) {
            self.community_token = Some(token);
        }
    }

    /// The credential set this configuration describes.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.api_key.clone(),
            self.store_token.as_deref().map(AccessToken::new),
            self.community_token.as_deref().map(AccessToken::new),
        )
    }

    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".steamy").join("config.yaml"))
    }

    /// Load from `path`, or the default location when `None`.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(PathBuf::from(p)),
            None => Self::load_from(Self::default_path()?),
        }
    }

    /// Load like [`load_at`](Self::load_at), falling back to defaults when the
    /// file does not exist.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match Self::load_at(path) {
            Err(crate::error::Error::Config(ConfigError::NotFound(p))) => {
                log::debug!("No configuration file at {}, using defaults", p);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: SteamConfig = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // Credentials live in this file
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Check settings that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        if self.settings.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be positive".into()).into());
        }

        if HeaderValue::from_str(&self.settings.user_agent).is_err() {
            return Err(ConfigError::Invalid(format!(
                "user_agent is not a valid header value: {:?}",
                self.settings.user_agent
            ))
            .into());
        }

        for (name, url) in [
            ("api_base_url", &self.settings.api_base_url),
            ("store_base_url", &self.settings.store_base_url),
            ("community_base_url", &self.settings.community_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                ))
                .into());
            }
        }

        Ok(())
    }
}
