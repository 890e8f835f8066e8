//! Credential resolution for outgoing requests
//!
//! A request either carries a bearer token, the Web API key, or nothing.
//! Tokens win over the key whenever the endpoint accepts one.

use super::{AccessToken, Credentials};
use crate::error::{ConfigError, Result};

/// Which bearer token an endpoint family accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenFamily {
    /// `api.steampowered.com` services; either token works
    WebApi,
    /// `store.steampowered.com`
    Store,
    /// `steamcommunity.com`
    Community,
}

/// Which of the two tokens was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Store,
    Community,
}

/// Authentication requirements of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPolicy {
    /// Token family accepted, if any
    pub token_family: Option<TokenFamily>,
    /// Whether the Web API key is accepted
    pub accepts_key: bool,
    /// Whether an unauthenticated call is refused
    pub required: bool,
}

impl AuthPolicy {
    /// Web API endpoint taking either a token or the key.
    pub const fn key_or_token() -> Self {
        Self {
            token_family: Some(TokenFamily::WebApi),
            accepts_key: true,
            required: true,
        }
    }

    /// Endpoint that only works with a bearer token.
    pub const fn token_only(family: TokenFamily) -> Self {
        Self {
            token_family: Some(family),
            accepts_key: false,
            required: true,
        }
    }

    /// Public endpoint that attaches a token of the given family if present.
    pub const fn optional_token(family: TokenFamily) -> Self {
        Self {
            token_family: Some(family),
            accepts_key: false,
            required: false,
        }
    }

    /// Public endpoint; never attaches credentials.
    pub const fn public() -> Self {
        Self {
            token_family: None,
            accepts_key: false,
            required: false,
        }
    }

    fn requirement(&self) -> &'static str {
        match (self.token_family, self.accepts_key) {
            (Some(_), true) => "an API key or access token",
            (Some(TokenFamily::Store), false) => "a store access token",
            (Some(TokenFamily::Community), false) => "a community access token",
            (Some(TokenFamily::WebApi), false) => "an access token",
            (None, true) => "an API key",
            (None, false) => "no credential",
        }
    }
}

/// The credential picked for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential<'a> {
    Token(&'a AccessToken, TokenKind),
    ApiKey(&'a str),
    Anonymous,
}

impl<'a> Credential<'a> {
    /// Query parameter carrying this credential.
    pub fn query_param(&self) -> Option<(&'static str, &'a str)> {
        match *self {
            Credential::Token(token, _) => Some(("access_token", token.as_str())),
            Credential::ApiKey(key) => Some(("key", key)),
            Credential::Anonymous => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Credential::Token(_, TokenKind::Store) => "store token",
            Credential::Token(_, TokenKind::Community) => "community token",
            Credential::ApiKey(_) => "api key",
            Credential::Anonymous => "anonymous",
        }
    }
}

/// Pick the credential for a request to `endpoint` under `policy`.
///
/// Order: applicable token, then API key, then anonymous. Fails with a
/// configuration error when the endpoint requires a credential that is not
/// configured, before any network activity.
pub fn resolve_credential<'a>(
    credentials: &'a Credentials,
    policy: &AuthPolicy,
    endpoint: &str,
) -> Result<Credential<'a>> {
    if let Some(family) = policy.token_family
        && let Some(credential) = token_for(credentials, family)
    {
        return Ok(credential);
    }

    if policy.accepts_key
        && let Some(key) = credentials.api_key()
    {
        return Ok(Credential::ApiKey(key));
    }

    if policy.required {
        return Err(ConfigError::MissingCredential {
            endpoint: endpoint.to_string(),
            required: policy.requirement(),
        }
        .into());
    }

    Ok(Credential::Anonymous)
}

fn token_for(credentials: &Credentials, family: TokenFamily) -> Option<Credential<'_>> {
    let store = credentials
        .store_token()
        .map(|t| Credential::Token(t, TokenKind::Store));
    let community = credentials
        .community_token()
        .map(|t| Credential::Token(t, TokenKind::Community));

    match family {
        TokenFamily::WebApi => store.or(community),
        TokenFamily::Store => store,
        TokenFamily::Community => community,
    }
}
