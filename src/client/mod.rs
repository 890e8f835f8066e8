//! Steam HTTP client
//!
//! [`Session`] owns the transport and the credential set. Façades in
//! [`crate::api`] borrow it through the [`RequestDispatch`] trait, which is
//! also what the mock dispatcher implements in tests.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub mod endpoint;
pub mod parallel;
pub mod session;
pub mod transport;

#[cfg(test)]
pub mod mock;

pub use endpoint::{ApiRequest, Endpoint, Host};
pub use session::{Session, Steam};
pub use transport::Transport;

/// Sends one request and returns the decoded JSON body.
///
/// Implementations resolve credentials, map HTTP failures to
/// [`ApiError`](crate::error::ApiError) variants, and reject bodies that are
/// not JSON. Interpreting the body is left to the caller.
#[async_trait]
pub trait RequestDispatch: Send + Sync {
    async fn dispatch(&self, request: ApiRequest) -> Result<Value>;
}
