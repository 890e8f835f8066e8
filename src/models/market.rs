//! Community market and inventory models

use serde::{Deserialize, Serialize};
use serde_json::Value;

const ECONOMY_IMAGE_BASE: &str = "https://community.cloudflare.steamstatic.com/economy/image";

/// Parse a formatted price such as `"$1,234.56"` into cents.
///
/// Currency symbols and thousands separators are dropped; returns `None`
/// when nothing numeric remains.
pub fn price_to_cents(formatted: &str) -> Option<u64> {
    let cleaned: String = formatted
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let value: f64 = cleaned.parse().ok()?;
    Some((value * 100.0).round() as u64)
}

/// Summary from `market/priceoverview`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowest_price: Option<String>,

    /// Units sold in the last 24 hours, formatted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median_price: Option<String>,
}

impl PriceInfo {
    pub fn lowest_price_cents(&self) -> Option<u64> {
        self.lowest_price.as_deref().and_then(price_to_cents)
    }

    pub fn median_price_cents(&self) -> Option<u64> {
        self.median_price.as_deref().and_then(price_to_cents)
    }
}

/// Page of listings or search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketListings {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub start: u32,

    #[serde(default)]
    pub pagesize: u32,

    #[serde(default)]
    pub total_count: u32,

    #[serde(default)]
    pub searchdata: Value,

    #[serde(default)]
    pub results: Vec<Value>,

    /// Listing details keyed by listing id (listings pages only)
    #[serde(default)]
    pub listinginfo: Value,
}

impl MarketListings {
    pub fn has_more_results(&self) -> bool {
        self.start + self.pagesize < self.total_count
    }
}

/// One point of an item's price history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketHistoryEntry {
    pub date: String,
    pub price: f64,
    pub volume: u64,
}

impl MarketHistoryEntry {
    pub fn price_cents(&self) -> u64 {
        (self.price * 100.0).round() as u64
    }

    /// Parse a raw `[date, price, "volume"]` row; rows that are too short or
    /// mistyped yield `None`.
    pub(crate) fn from_row(row: &Value) -> Option<Self> {
        let cells = row.as_array()?;
        if cells.len() < 3 {
            return None;
        }
        Some(Self {
            date: cells[0].as_str()?.to_string(),
            price: super::de::value_as_f64(&cells[1])?,
            volume: super::de::value_as_f64(&cells[2])? as u64,
        })
    }
}

/// Asset entry of a community inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryAsset {
    pub appid: u32,
    pub contextid: String,
    pub assetid: String,
    pub classid: String,
    pub instanceid: String,

    #[serde(default)]
    pub amount: String,
}

/// Description shared by assets with the same class and instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDescription {
    pub appid: u32,
    pub classid: String,
    pub instanceid: String,

    #[serde(default)]
    pub icon_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url_large: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_hash_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_color: Option<String>,

    #[serde(default, rename = "type")]
    pub item_type: String,

    #[serde(default)]
    pub tradable: u8,

    #[serde(default)]
    pub marketable: u8,

    #[serde(default)]
    pub commodity: u8,

    #[serde(default)]
    pub tags: Vec<Value>,
}

impl ItemDescription {
    pub fn is_tradable(&self) -> bool {
        self.tradable == 1
    }

    pub fn is_marketable(&self) -> bool {
        self.marketable == 1
    }

    pub fn is_commodity(&self) -> bool {
        self.commodity == 1
    }

    pub fn full_icon_url(&self) -> String {
        format!("{}/{}", ECONOMY_IMAGE_BASE, self.icon_url)
    }

    pub fn full_large_icon_url(&self) -> Option<String> {
        self.icon_url_large
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|path| format!("{}/{}", ECONOMY_IMAGE_BASE, path))
    }
}

/// Page of `inventory/{steamid}/{appid}/{contextid}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub assets: Vec<InventoryAsset>,

    #[serde(default)]
    pub descriptions: Vec<ItemDescription>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_items: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_assetid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_inventory_count: Option<u32>,

    #[serde(default)]
    pub success: u8,
}

impl Inventory {
    pub fn is_success(&self) -> bool {
        self.success == 1
    }

    pub fn has_more_items(&self) -> bool {
        self.more_items == Some(1)
    }

    /// Description matching an asset's class and instance
    pub fn description_for(&self, asset: &InventoryAsset) -> Option<&ItemDescription> {
        self.descriptions
            .iter()
            .find(|d| d.classid == asset.classid && d.instanceid == asset.instanceid)
    }
}
