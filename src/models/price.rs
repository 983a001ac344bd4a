use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Egg variant tracked by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EggType {
    White,
    Brown,
}

impl EggType {
    /// Every variant, in a fixed order. Used by the refresher and the
    /// synthetic backfill, which write one record per variant.
    pub const ALL: [EggType; 2] = [EggType::White, EggType::Brown];

    /// Convert from a request string (case-insensitive)
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "white" => Ok(EggType::White),
            "brown" => Ok(EggType::Brown),
            _ => Err(format!("Invalid egg type: {}", s)),
        }
    }

    /// Convert to the canonical lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            EggType::White => "white",
            EggType::Brown => "brown",
        }
    }
}

/// A single observed price for one egg variant at one store.
///
/// Records are append-only: a price change is a new record with a later
/// `recorded_at`, never an update to an existing one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub id: i64,
    pub store_id: i64,
    pub egg_type: EggType,
    pub price: Decimal, // dollars, 2 decimal places
    pub recorded_at: DateTime<Utc>,
}
