//! Endpoint descriptions and request values
//!
//! Façades never build URLs themselves. They describe the endpoint (which
//! host, which path, which credentials it accepts) and the parameters, and
//! the dispatcher turns that into an HTTP call.

use reqwest::Method;

use crate::auth::{AuthPolicy, TokenFamily};
use crate::config::Settings;

/// Which Steam host serves an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    /// `api.steampowered.com`
    Api,
    /// `store.steampowered.com`
    Store,
    /// `steamcommunity.com`
    Community,
}

impl Host {
    fn base_url<'a>(&self, settings: &'a Settings) -> &'a str {
        match self {
            Host::Api => &settings.api_base_url,
            Host::Store => &settings.store_base_url,
            Host::Community => &settings.community_base_url,
        }
    }
}

/// A single Steam endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: Host,
    /// Path relative to the host, always starting with `/`
    pub path: String,
    pub method: Method,
    pub auth: AuthPolicy,
}

impl Endpoint {
    /// Versioned Web API method, e.g. `ISteamUser/GetFriendList/v1`.
    ///
    /// Accepts a token or the API key unless changed with [`auth`](Self::auth).
    pub fn web_api(interface: &str, method: &str, version: u32) -> Self {
        Self {
            host: Host::Api,
            path: format!("/{}/{}/v{}/", interface, method, version),
            method: Method::GET,
            auth: AuthPolicy::key_or_token(),
        }
    }

    /// Store page endpoint; public unless changed.
    pub fn store(path: &str) -> Self {
        Self {
            host: Host::Store,
            path: normalize(path),
            method: Method::GET,
            auth: AuthPolicy::public(),
        }
    }

    /// Community endpoint; attaches the community token when one exists.
    pub fn community(path: &str) -> Self {
        Self {
            host: Host::Community,
            path: normalize(path),
            method: Method::GET,
            auth: AuthPolicy::optional_token(TokenFamily::Community),
        }
    }

    pub fn auth(mut self, policy: AuthPolicy) -> Self {
        self.auth = policy;
        self
    }

    pub fn post(mut self) -> Self {
        self.method = Method::POST;
        self
    }

    /// Short name for logs and error messages, e.g. `ISteamUser/GetFriendList`.
    pub fn name(&self) -> String {
        let trimmed = self.path.trim_matches('/');
        match self.host {
            Host::Api => trimmed
                .rsplit_once('/')
                .filter(|(_, version)| version.starts_with('v'))
                .map(|(name, _)| name.to_string())
                .unwrap_or_else(|| trimmed.to_string()),
            Host::Store | Host::Community => trimmed.to_string(),
        }
    }

    /// Absolute URL under the configured base for this host.
    pub fn url(&self, settings: &Settings) -> String {
        format!("{}{}", self.host.base_url(settings).trim_end_matches('/'), self.path)
    }
}

fn normalize(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// An endpoint plus its query parameters
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add the parameter only when a value is present.
    pub fn opt_param<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Steam's `1`/`0` boolean form.
    pub fn flag(self, key: &str, value: bool) -> Self {
        self.param(key, if value { 1 } else { 0 })
    }

    /// Value of the first parameter named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
