//! Bearer access tokens and the two payload shapes they are copied from

use std::fmt;

use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// A Steam bearer token (store or community `webapi_token`).
///
/// The raw string is opaque to the client; it is only decoded for
/// diagnostics such as expiry reporting.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    raw: String,
}

/// Claims read from a JWT-shaped token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Steam ID the token was issued to
    #[serde(default)]
    pub sub: Option<String>,

    /// Audiences, e.g. `web:store` or `web:community`
    #[serde(default, deserialize_with = "deserialize_audience")]
    pub aud: Vec<String>,

    /// Expiry as a Unix timestamp
    #[serde(default)]
    pub exp: Option<i64>,
}

impl AccessToken {
    /// Wrap a raw token string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into().trim().to_string(),
        }
    }

    /// Extract the token from the store's async config response.
    ///
    /// The payload looks like `{"success":1,"data":{"webapi_token":"..."}}`.
    pub fn from_async_config(payload: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct AsyncConfigData {
            webapi_token: Option<String>,
        }

        #[derive(Deserialize)]
        struct AsyncConfig {
            #[serde(default)]
            success: i64,
            data: Option<AsyncConfigData>,
        }

        let config: AsyncConfig = serde_json::from_str(payload)
            .map_err(|e| ConfigError::Invalid(format!("store token payload is not JSON: {}", e)))?;

        if config.success != 1 {
            return Err(ConfigError::Invalid(format!(
                "store token payload reports success={}; sign in to the store first",
                config.success
            ))
            .into());
        }

        config
            .data
            .and_then(|d| d.webapi_token)
            .filter(|t| !t.trim().is_empty())
            .map(Self::new)
            .ok_or_else(|| {
                ConfigError::Invalid("store token payload has no data.webapi_token".to_string())
                    .into()
            })
    }

    /// Extract the token from the community page's `data-loyalty_webapi_token`
    /// attribute, which holds a JSON-encoded string (`"\"eyJ...\""`).
    pub fn from_loyalty_config(encoded: &str) -> Result<Self> {
        let token: String = serde_json::from_str(encoded.trim()).map_err(|e| {
            ConfigError::Invalid(format!("community token is not a JSON string: {}", e))
        })?;

        if token.trim().is_empty() {
            return Err(ConfigError::Invalid("community token is empty".to_string()).into());
        }

        Ok(Self::new(token))
    }

    /// The raw token string as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Decode the JWT payload, if the token is JWT-shaped.
    pub fn claims(&self) -> Option<TokenClaims> {
        let mut parts = self.raw.split('.');
        let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }

        let bytes = general_purpose::URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Expiry time, when the token carries an `exp` claim.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims()
            .and_then(|c| c.exp)
            .and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Whether the token is known to have expired.
    ///
    /// Tokens without a readable expiry are never reported as expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|exp| exp <= Utc::now())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&redact(&self.raw)).finish()
    }
}

/// Mask a secret for logs, keeping only the last four characters.
pub fn redact(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "***".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("***{}", tail)
}

fn deserialize_audience<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Audience {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Audience>::deserialize(deserializer)? {
        Some(Audience::One(aud)) => vec![aud],
        Some(Audience::Many(auds)) => auds,
        None => Vec::new(),
    })
}
