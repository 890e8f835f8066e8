//! The session's HTTP transport
//!
//! Opened once per session and released exactly once, whichever way the
//! session ends. After release every send fails with a transport error.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use log::info;
use reqwest::Client as HttpClient;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::config::Settings;
use crate::error::{ApiError, Result};

pub struct Transport {
    http: Mutex<Option<HttpClient>>,
    releases: AtomicUsize,
}

impl Transport {
    /// Build the HTTP client for `settings`.
    pub fn open(settings: &Settings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        info!("Opened Steam transport");

        Ok(Self {
            http: Mutex::new(Some(http)),
            releases: AtomicUsize::new(0),
        })
    }

    /// A handle to the live client, or a transport error once released.
    ///
    /// reqwest clients are reference counted, so the handle is cheap and
    /// in-flight requests finish even if release happens meanwhile.
    pub fn client(&self) -> Result<HttpClient> {
        let guard = self.http.lock().unwrap_or_else(|e| e.into_inner());
        guard
            .clone()
            .ok_or_else(|| ApiError::Network("Session transport has been released".to_string()).into())
    }

    pub fn is_open(&self) -> bool {
        self.http
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Release the client. Returns true only for the call that released it.
    pub fn release(&self) -> bool {
        let taken = self.http.lock().unwrap_or_else(|e| e.into_inner()).take();
        if taken.is_some() {
            self.releases.fetch_add(1, Ordering::SeqCst);
            info!("Released Steam transport");
            true
        } else {
            false
        }
    }

    /// How many times the client was actually released (0 or 1).
    pub fn release_count(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("open", &self.is_open())
            .field("releases", &self.release_count())
            .finish()
    }
}
