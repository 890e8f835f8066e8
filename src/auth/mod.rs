//! Credentials and credential resolution

use std::fmt;

pub mod resolver;
pub mod token;

pub use resolver::{AuthPolicy, Credential, TokenFamily, TokenKind, resolve_credential};
pub use token::{AccessToken, TokenClaims, redact};

/// The credential set a session authenticates with.
///
/// Any subset may be present; missing credentials only matter when an
/// endpoint that needs them is called.
#[derive(Clone, Default)]
pub struct Credentials {
    api_key: Option<String>,
    store_token: Option<AccessToken>,
    community_token: Option<AccessToken>,
}

impl Credentials {
    /// Build a credential set. Blank strings count as absent.
    pub fn new(
        api_key: Option<String>,
        store_token: Option<AccessToken>,
        community_token: Option<AccessToken>,
    ) -> Self {
        Self {
            api_key: api_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            store_token: store_token.filter(|t| !t.as_str().is_empty()),
            community_token: community_token.filter(|t| !t.as_str().is_empty()),
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn store_token(&self) -> Option<&AccessToken> {
        self.store_token.as_ref()
    }

    pub fn community_token(&self) -> Option<&AccessToken> {
        self.community_token.as_ref()
    }

    /// True when no credential of any kind is configured.
    pub fn is_empty(&self) -> bool {
        self.api_key.is_none() && self.store_token.is_none() && self.community_token.is_none()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_deref().map(redact))
            .field("store_token", &self.store_token)
            .field("community_token", &self.community_token)
            .finish()
    }
}
