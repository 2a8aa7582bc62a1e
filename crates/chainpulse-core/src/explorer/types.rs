//! Deserialization types for block-explorer payloads.
//!
//! Every upstream field is independently optional: the explorer omits,
//! renames, and retypes fields across deployments, and the absence of any
//! one field must not abort processing of the others. Unknown fields are
//! ignored by serde's default behavior.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// A numeric upstream field that may arrive as a JSON number or as its
/// decimal-string representation.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Magnitude {
    Number(f64),
    Text(String),
}

impl Magnitude {
    /// Returns the numeric value, parsing decimal strings as needed.
    ///
    /// Non-numeric strings yield `None` rather than an error: a malformed
    /// magnitude degrades that one display field, nothing more.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Network-wide counters from the stats resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkStats {
    #[serde(default)]
    pub total_blocks: Option<Magnitude>,
    #[serde(default)]
    pub total_transactions: Option<Magnitude>,
    #[serde(default)]
    pub total_addresses: Option<Magnitude>,
    #[serde(default)]
    pub gas_prices: Option<GasPrices>,
}

/// Gas price summary nested inside [`NetworkStats`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GasPrices {
    #[serde(default)]
    pub average: Option<f64>,
}

/// One block from the recent-blocks listing, most-recent-first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Block {
    /// Sequence number. Some explorer versions call this `height`.
    #[serde(default, alias = "height")]
    pub number: Option<u64>,
    /// Block timestamp, leniently parsed. A garbage timestamp yields `None`
    /// without failing the page.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub miner: Option<Miner>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub gas_used: Option<Magnitude>,
    #[serde(default)]
    pub gas_limit: Option<Magnitude>,
    #[serde(default)]
    pub transactions_count: Option<u64>,
}

impl Block {
    /// Returns the producer address, treating empty and `"unknown"` values
    /// as no producer.
    #[must_use]
    pub fn producer(&self) -> Option<&str> {
        self.miner
            .as_ref()
            .and_then(|m| m.hash.as_deref())
            .filter(|hash| !hash.is_empty() && *hash != "unknown")
    }
}

/// Producer credit attached to a block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Miner {
    #[serde(default)]
    pub hash: Option<String>,
}

/// Paged block listing envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockPage {
    #[serde(default)]
    pub items: Vec<Block>,
}

/// One transaction from the per-address listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub hash: Option<String>,
    /// Free-form upstream status string, commonly `"success"` or `"ok"`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Two-element duration pair in milliseconds; confirmation latency is
    /// read from index 1 when present.
    #[serde(default)]
    pub confirmation_duration: Option<Vec<f64>>,
}

/// Paged transaction listing envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionPage {
    #[serde(default)]
    pub items: Vec<Transaction>,
}

/// Deserializes an RFC 3339 timestamp string, mapping absent, null, or
/// unparseable values to `None` instead of a deserialization error.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}
