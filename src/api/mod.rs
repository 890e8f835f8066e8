//! Namespaced Steam operations
//!
//! Each façade borrows a [`RequestDispatch`](crate::client::RequestDispatch)
//! for the duration of a call:
//! - [`PlayerApi`] - profiles, friends, bans, vanity URLs
//! - [`GamesApi`] - libraries, the app list, achievements, store details
//! - [`StatsApi`] - global and per-user stats, player counts, news
//! - [`MarketApi`] - community market prices and inventories
//! - [`FamilyApi`] - Steam Families (token only)

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Error, Result};

mod family;
mod games;
mod market;
mod player;
mod stats;

pub use family::{FamilyApi, SharedLibraryOptions};
pub use games::GamesApi;
pub use market::{CURRENCY_USD, MarketApi, MarketSearch, MarketSort};
pub use player::PlayerApi;
pub use stats::{MAX_NEWS_ITEMS, StatsApi};

/// Most ids Steam accepts in one multi-id request
pub const MAX_IDS_PER_REQUEST: usize = 100;

/// Decode `value` into `T`, reporting failures as malformed responses.
pub(crate) fn decode<T: DeserializeOwned>(value: Value, context: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        Error::from(ApiError::InvalidResponse(format!(
            "Unexpected {} response: {}",
            context, e
        )))
    })
}

/// Take `key` out of a JSON object, or fail as a malformed response.
pub(crate) fn take_field(value: &mut Value, key: &str, context: &str) -> Result<Value> {
    value
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| missing(key, context))
}

pub(crate) fn missing(key: &str, context: &str) -> Error {
    ApiError::InvalidResponse(format!("Missing field '{}' in {} response", key, context)).into()
}

pub(crate) fn validate_app_id(app_id: u32) -> Result<()> {
    if app_id == 0 {
        return Err(Error::InvalidInput(
            "App ID must be a positive integer".to_string(),
        ));
    }
    Ok(())
}
