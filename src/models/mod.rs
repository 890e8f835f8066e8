//! Response models for Steam endpoints

pub mod family;
pub mod game;
pub mod market;
pub mod player;
pub mod stats;
pub mod steam_id;

pub use family::{FamilyGroupStatus, FamilyRole, MembershipHistoryEntry, PlaytimeEntry, PlaytimeSummary};
pub use game::{
    Achievement, AppDetails, GameSchema, OwnedGame, OwnedGamesOptions, PlayerAchievements,
    SchemaAchievement, SchemaStat, SteamApp,
};
pub use market::{
    Inventory, InventoryAsset, ItemDescription, MarketHistoryEntry, MarketListings, PriceInfo,
};
pub use player::{Friend, PersonaState, PlayerBan, PlayerSummary, VanityUrlResolution};
pub use stats::{
    GlobalAchievementStat, GlobalStat, NewsItem, PlayerCount, UserAchievement, UserStat, UserStats,
};
pub use steam_id::SteamId;

/// Lenient deserializers for fields Steam sends as either numbers or strings.
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn value_as_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn f64_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        value_as_f64(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("expected a number, got {}", value)))
    }

    pub fn u32_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let v = f64_from_any(deserializer)?;
        if v.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&v) {
            return Err(serde::de::Error::custom(format!(
                "expected a non-negative whole number, got {}",
                v
            )));
        }
        Ok(v as u32)
    }

    pub fn string_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Null => Ok(String::new()),
            other => Err(serde::de::Error::custom(format!(
                "expected a string or number, got {}",
                other
            ))),
        }
    }
}
