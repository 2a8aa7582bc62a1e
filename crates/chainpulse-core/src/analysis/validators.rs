//! Validator activity tallying over the recent-blocks window.

use std::collections::HashMap;

use crate::explorer::types::Block;

/// Per-validator production tally for one sampled window.
///
/// Derived and ephemeral: recomputed every aggregation cycle, never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorTally {
    /// Raw producer address, preserved for deep-linking.
    pub address: String,
    /// Truncated presentation form (`0xabcd...1234`).
    pub display_address: String,
    /// Blocks produced within the sampled window. Always >= 1.
    pub blocks_produced: u64,
    /// Share of the sampled window, 0-100.
    pub share: f64,
}

/// Determines the single most active validator in a most-recent-first
/// block list.
///
/// Blocks without a known producer are excluded from the tally but still
/// count toward the sampled-window total used for the share. The winner is
/// the strictly greatest tally; ties break deterministically in favor of the
/// producer first seen in the supplied block order. Returns `None` when the
/// list is empty or no block has a known producer.
#[must_use]
pub fn most_active_validator(blocks: &[Block]) -> Option<ValidatorTally> {
    if blocks.is_empty() {
        return None;
    }

    let mut counts: HashMap<&str, u64> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for block in blocks {
        let Some(address) = block.producer() else { continue };
        if !counts.contains_key(address) {
            first_seen.push(address);
        }
        *counts.entry(address).or_insert(0) += 1;
    }

    // Scanning in first-seen order makes the tie-break deterministic.
    let mut winner: Option<(&str, u64)> = None;
    for address in first_seen {
        let produced = counts[address];
        if winner.map_or(true, |(_, best)| produced > best) {
            winner = Some((address, produced));
        }
    }

    winner.map(|(address, blocks_produced)| {
        #[allow(clippy::cast_precision_loss)]
        let share = blocks_produced as f64 / blocks.len() as f64 * 100.0;
        ValidatorTally {
            address: address.to_string(),
            display_address: display_address(address),
            blocks_produced,
            share,
        }
    })
}

/// Truncates an address to its first 6 and last 4 characters joined by an
/// ellipsis. Addresses too short to truncate pass through unchanged.
#[must_use]
pub fn display_address(address: &str) -> String {
    if address.len() > 10 && address.is_ascii() {
        format!("{}...{}", &address[..6], &address[address.len() - 4..])
    } else {
        address.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::types::Miner;

    fn block_by(producer: &str) -> Block {
        Block {
            miner: Some(Miner { hash: Some(producer.to_string()) }),
            ..Block::default()
        }
    }

    #[test]
    fn test_majority_producer_wins() {
        let blocks = vec![block_by("0xaaaa"), block_by("0xbbbb"), block_by("0xaaaa")];

        let winner = most_active_validator(&blocks).unwrap();
        assert_eq!(winner.address, "0xaaaa");
        assert_eq!(winner.blocks_produced, 2);
        assert!((winner.share - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_tie_breaks_to_first_seen() {
        let blocks =
            vec![block_by("0xbbbb"), block_by("0xaaaa"), block_by("0xaaaa"), block_by("0xbbbb")];

        let winner = most_active_validator(&blocks).unwrap();
        assert_eq!(winner.address, "0xbbbb");
        assert_eq!(winner.blocks_produced, 2);
    }

    #[test]
    fn test_unknown_producers_excluded_but_counted_in_window() {
        let mut blocks = vec![block_by("0xaaaa"), block_by("0xaaaa")];
        blocks.push(Block { miner: Some(Miner { hash: Some("unknown".into()) }), ..Block::default() });
        blocks.push(Block::default());

        let winner = most_active_validator(&blocks).unwrap();
        assert_eq!(winner.blocks_produced, 2);
        // Share is over all 4 sampled blocks, not just attributed ones.
        assert!((winner.share - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_known_producer_is_no_winner() {
        let blocks = vec![Block::default(), Block::default()];
        assert!(most_active_validator(&blocks).is_none());
        assert!(most_active_validator(&[]).is_none());
    }

    #[test]
    fn test_determinism_over_identical_input() {
        let blocks = vec![block_by("0xcccc"), block_by("0xdddd"), block_by("0xcccc")];

        let first = most_active_validator(&blocks).unwrap();
        let second = most_active_validator(&blocks).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_display_address_truncation() {
        assert_eq!(
            display_address("0x1234567890abcdef1234567890abcdef12345678"),
            "0x1234...5678"
        );
        assert_eq!(display_address("0xshort"), "0xshort");
    }
}
