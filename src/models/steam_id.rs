//! 64-bit Steam identifiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Prefix shared by the 17-digit ids of individual accounts
const INDIVIDUAL_PREFIX: &str = "7656119";

/// A numeric Steam ID.
///
/// Any `u64` is accepted; Steam decides whether it names an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SteamId(pub u64);

impl SteamId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Whether the id has the shape of an individual account id.
    pub fn is_individual_account(&self) -> bool {
        let s = self.0.to_string();
        s.len() == 17 && s.starts_with(INDIVIDUAL_PREFIX)
    }

    /// Join ids into the comma-separated form Steam expects.
    pub fn join(ids: &[SteamId]) -> String {
        ids.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl From<u64> for SteamId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SteamId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("Steam ID cannot be empty".to_string()));
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidInput(format!(
                "Steam ID must be numeric, got '{}'",
                trimmed
            )));
        }
        trimmed
            .parse::<u64>()
            .map(SteamId)
            .map_err(|_| Error::InvalidInput(format!("Steam ID '{}' is out of range", trimmed)))
    }
}

// Steam sends ids as strings to dodge JavaScript number precision.
impl Serialize for SteamId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for SteamId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u64),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Ok(SteamId(n)),
            Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}
