//! Error types for the steamy client

use std::time::Duration;
use thiserror::Error;

/// Result type alias for steamy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the library and CLI
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Coarse classification of an [`Error`].
///
/// The first four variants are the categories callers usually branch on;
/// the rest cover Steam-specific outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    Authentication,
    ResponseFormat,
    NotFound,
    PrivateProfile,
    RateLimited,
    Rejected,
    InvalidInput,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Configuration,
            Error::Api(api) => api.kind(),
            Error::Io(_) => ErrorKind::Transport,
            Error::Json(_) => ErrorKind::ResponseFormat,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Steam rejected the supplied credential. Check that your API key or token is valid and not expired.")]
    Unauthorized,

    #[error("Access denied. The supplied credential cannot access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Profile for Steam ID {0} is private or not accessible")]
    PrivateProfile(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Steam API error: {0}")]
    Steam(String),
}

impl ApiError {
    /// Classify this API error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Unauthorized | ApiError::Forbidden => ErrorKind::Authentication,
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::PrivateProfile(_) => ErrorKind::PrivateProfile,
            ApiError::RateLimit(_) => ErrorKind::RateLimited,
            ApiError::Network(_) => ErrorKind::Transport,
            ApiError::InvalidResponse(_) => ErrorKind::ResponseFormat,
            ApiError::BadRequest(_) | ApiError::ServerError(_) | ApiError::Steam(_) => {
                ErrorKind::Rejected
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to Steam".to_string())
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found at {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error(
        "{endpoint} requires {required}, but none is configured. Set STEAM_API_KEY, STEAM_STORE_TOKEN or STEAM_COMMUNITY_TOKEN."
    )]
    MissingCredential {
        endpoint: String,
        required: &'static str,
    },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
