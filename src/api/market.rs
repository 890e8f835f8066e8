//! Community market and inventory operations
//!
//! These endpoints live on steamcommunity.com and work without credentials;
//! a community token is attached when one is configured.

use serde_json::Value;

use super::decode;
use crate::client::{ApiRequest, Endpoint, RequestDispatch};
use crate::error::{ApiError, Result};
use crate::models::{Inventory, MarketHistoryEntry, MarketListings, PriceInfo, SteamId};

/// Steam currency code for US dollars
pub const CURRENCY_USD: u32 = 1;

/// Sort orders understood by the market search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketSort {
    Popular,
    Quantity,
    Price,
    Name,
}

impl MarketSort {
    fn as_str(&self) -> &'static str {
        match self {
            MarketSort::Popular => "popular",
            MarketSort::Quantity => "quantity",
            MarketSort::Price => "price",
            MarketSort::Name => "name",
        }
    }
}

/// Parameters for [`MarketApi::search_market`]
#[derive(Debug, Clone)]
pub struct MarketSearch {
    pub query: String,
    pub app_id: Option<u32>,
    pub start: u32,
    pub count: u32,
    pub sort: MarketSort,
    pub descending: bool,
}

impl Default for MarketSearch {
    fn default() -> Self {
        Self {
            query: String::new(),
            app_id: None,
            start: 0,
            count: 100,
            sort: MarketSort::Popular,
            descending: true,
        }
    }
}

/// Community market operations
#[derive(Clone, Copy)]
pub struct MarketApi<'a> {
    client: &'a dyn RequestDispatch,
}

impl<'a> MarketApi<'a> {
    pub fn new(client: &'a dyn RequestDispatch) -> Self {
        Self { client }
    }

    /// Current lowest and median price; `None` if the market has no data.
    pub async fn get_item_price(
        &self,
        market_hash_name: &str,
        app_id: u32,
        currency: u32,
    ) -> Result<Option<PriceInfo>> {
        let request = ApiRequest::new(Endpoint::community("market/priceoverview/"))
            .param("appid", app_id)
            .param("market_hash_name", market_hash_name)
            .param("currency", currency);

        let body = self.client.dispatch(request).await?;
        if !is_success(&body) {
            return Ok(None);
        }
        decode(body, "market/priceoverview").map(Some)
    }

    /// One page of sell listings for an item.
    pub async fn get_market_listings(
        &self,
        market_hash_name: &str,
        app_id: u32,
        start: u32,
        count: u32,
    ) -> Result<MarketListings> {
        let request = ApiRequest::new(Endpoint::community("market/listings/"))
            .param("appid", app_id)
            .param("market_hash_name", market_hash_name)
            .param("start", start)
            .param("count", count)
            .param("currency", CURRENCY_USD)
            .param("format", "json");

        let body = self.client.dispatch(request).await?;
        decode(body, "market/listings")
    }

    /// Median sale price history. Empty when the market reports no success.
    pub async fn get_price_history(
        &self,
        market_hash_name: &str,
        app_id: u32,
    ) -> Result<Vec<MarketHistoryEntry>> {
        let request = ApiRequest::new(Endpoint::community("market/pricehistory/"))
            .param("appid", app_id)
            .param("market_hash_name", market_hash_name);

        let body = self.client.dispatch(request).await?;
        if !is_success(&body) {
            return Ok(Vec::new());
        }

        Ok(body
            .get("prices")
            .and_then(Value::as_array)
            .map(|rows| rows.iter().filter_map(MarketHistoryEntry::from_row).collect())
            .unwrap_or_default())
    }

    /// One page of a player's inventory for `app_id`/`context_id`.
    pub async fn get_inventory(
        &self,
        steam_id: SteamId,
        app_id: u32,
        context_id: &str,
        start_assetid: Option<&str>,
        count: u32,
    ) -> Result<Inventory> {
        let path = format!("inventory/{}/{}/{}", steam_id, app_id, context_id);
        let request = ApiRequest::new(Endpoint::community(&path))
            .param("l", "english")
            .param("count", count)
            .opt_param("start_assetid", start_assetid);

        let body = self.client.dispatch(request).await?;

        if let Some(message) = body.get("error").and_then(Value::as_str) {
            let lower = message.to_lowercase();
            return Err(if lower.contains("private") {
                ApiError::PrivateProfile(steam_id.to_string())
            } else if lower.contains("not found") {
                ApiError::NotFound(format!("Inventory of {}", steam_id))
            } else {
                ApiError::Steam(format!("Inventory error: {}", message))
            }
            .into());
        }

        decode(body, "inventory")
    }

    /// Search market listings.
    pub async fn search_market(&self, search: &MarketSearch) -> Result<MarketListings> {
        let request = ApiRequest::new(Endpoint::community("market/search/render/"))
            .param("query", &search.query)
            .param("start", search.start)
            .param("count", search.count)
            .param("sort_column", search.sort.as_str())
            .param("sort_dir", if search.descending { "desc" } else { "asc" })
            .param("norender", 1)
            .opt_param("appid", search.app_id);

        let body = self.client.dispatch(request).await?;
        decode(body, "market/search")
    }

    pub async fn get_popular_items(&self, app_id: Option<u32>, count: u32) -> Result<MarketListings> {
        self.search_market(&MarketSearch {
            app_id,
            count,
            sort: MarketSort::Popular,
            ..MarketSearch::default()
        })
        .await
    }

    pub async fn get_recent_items(&self, app_id: Option<u32>, count: u32) -> Result<MarketListings> {
        self.search_market(&MarketSearch {
            app_id,
            count,
            sort: MarketSort::Quantity,
            ..MarketSearch::default()
        })
        .await
    }
}

// `success` is a bool on most pages and 1/0 on some
fn is_success(body: &Value) -> bool {
    match body.get("success") {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        _ => false,
    }
}
