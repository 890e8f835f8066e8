//! Mock dispatcher for testing
//!
//! Records every request and answers with canned JSON keyed by endpoint
//! name, so façades can be tested without a server.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{ApiRequest, RequestDispatch};
use crate::error::{ApiError, Result};

/// A captured request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Endpoint name, e.g. `ISteamUser/GetFriendList`
    pub endpoint: String,
    /// HTTP method
    pub method: reqwest::Method,
    /// Query parameters in the order they were added
    pub params: Vec<(String, String)>,
}

impl CapturedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Mock dispatcher.
///
/// # Example
/// ```ignore
/// let mock = MockDispatcher::new()
///     .with_response("ISteamUser/GetFriendList", json!({"friendslist": {"friends": []}}))
///     .await;
/// let friends = PlayerApi::new(&mock).get_friends_list(SteamId(1)).await?;
/// ```
#[derive(Default)]
pub struct MockDispatcher {
    /// Responses by endpoint name; reused for every call
    responses: Arc<Mutex<HashMap<String, Value>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests to `endpoint` with `body`.
    pub async fn with_response(self, endpoint: &str, body: Value) -> Self {
        self.responses
            .lock()
            .await
            .insert(endpoint.to_string(), body);
        self
    }

    /// Fail the next request with `error`.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// The only captured request; panics unless exactly one was made.
    pub async fn single_request(&self) -> CapturedRequest {
        let requests = self.captured_requests().await;
        assert_eq!(requests.len(), 1, "expected one request, got {:?}", requests);
        requests[0].clone()
    }
}

#[async_trait]
impl RequestDispatch for MockDispatcher {
    async fn dispatch(&self, request: ApiRequest) -> Result<Value> {
        let name = request.endpoint.name();
        self.captured_requests.lock().await.push(CapturedRequest {
            endpoint: name.clone(),
            method: request.endpoint.method.clone(),
            params: request.params,
        });

        if let Some(error) = self.error.lock().await.take() {
            return Err(error.into());
        }

        self.responses
            .lock()
            .await
            .get(&name)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("no mock response for {}", name)).into())
    }
}
