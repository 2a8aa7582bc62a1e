//! Latest-transaction summarization for one user.

use crate::{explorer::types::Transaction, types::UserMetrics};

/// Marker for values the upstream did not supply.
const UNAVAILABLE: &str = "N/A";

/// Summarizes the most recent entry of a caller-limited transaction list.
///
/// The list is already filtered to interactions with one target contract and
/// bounded to the most recent entry; the first element is taken as-is.
/// Confirmation latency is read from index 1 of the upstream duration pair
/// (milliseconds) when present, else reported as unavailable. Returns `None`
/// for an empty list.
#[must_use]
pub fn summarize_latest(transactions: &[Transaction]) -> Option<UserMetrics> {
    let tx = transactions.first()?;

    let confirmation_time = tx
        .confirmation_duration
        .as_ref()
        .and_then(|pair| pair.get(1))
        .map_or_else(|| UNAVAILABLE.to_string(), |ms| format!("{:.3} secs", ms / 1000.0));

    // Rendered both upstream-local and as epoch seconds so the consumer can
    // re-format in its own locale.
    let (last_tx_timestamp, last_tx_unix_timestamp) = match tx.timestamp {
        Some(ts) => (ts.format("%Y-%m-%d %H:%M:%S UTC").to_string(), Some(ts.timestamp())),
        None => (UNAVAILABLE.to_string(), None),
    };

    Some(UserMetrics {
        last_tx_hash: tx.hash.clone(),
        last_tx_status: tx.status.clone(),
        last_tx_timestamp,
        last_tx_unix_timestamp,
        confirmation_time,
    })
}
