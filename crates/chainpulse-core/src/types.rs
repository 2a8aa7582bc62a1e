//! Externally observable response types.
//!
//! These serialize in the wire shape the consuming UI renders (camelCase
//! keys). Everything here is request-scoped: constructed during one
//! aggregation cycle and discarded after serialization.

use serde::{Deserialize, Serialize};

/// The unit returned for every aggregation cycle, success or degraded.
///
/// `success` is true iff at least one primary source (stats or blocks)
/// returned a usable payload; it is independent of the user-transaction
/// stage. `fallback` is set only on the full-failure path, where every
/// display field carries a configured placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    pub success: bool,
    pub data: MetricsData,
    /// Unix timestamp of the cycle, in milliseconds.
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
}

/// Normalized display fields, every one already formatted for rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsData {
    pub block_time: String,
    pub total_blocks: String,
    pub total_transactions: String,
    pub total_addresses: String,
    pub most_active_validator: String,
    /// Raw winner address for deep-linking; null when there is no winner.
    pub validator_address: Option<String>,
    pub validator_blocks: u64,
    pub gas_price: String,
    /// ISO-8601 timestamp of computation.
    pub last_updated: String,
    /// Present only when the user-transaction stage ran and found an entry.
    pub user_metrics: Option<UserMetrics>,
}

/// Summary of the user's latest interaction with the target contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserMetrics {
    pub last_tx_hash: Option<String>,
    pub last_tx_status: Option<String>,
    /// Upstream-local human rendering, `"N/A"` when unavailable.
    pub last_tx_timestamp: String,
    /// Epoch seconds for consumer-side re-formatting.
    pub last_tx_unix_timestamp: Option<i64>,
    /// `"{:.3} secs"` or `"N/A"`.
    pub confirmation_time: String,
}
