//! Average inter-block interval over the recent-blocks window.

use crate::explorer::types::Block;

/// Inclusive window of representative inter-block deltas, in seconds.
///
/// Deltas outside the window are upstream clock skew, gaps, or reorg
/// artifacts and would corrupt the headline metric.
pub const MIN_DELTA_SECS: f64 = 0.1;
pub const MAX_DELTA_SECS: f64 = 10.0;

/// Estimates the average block time from a most-recent-first block list.
///
/// Computes the absolute timestamp delta for every adjacent pair, discards
/// deltas outside [`MIN_DELTA_SECS`]..=[`MAX_DELTA_SECS`], and returns the
/// arithmetic mean of the survivors rendered to one decimal place with an
/// `s` suffix. Returns `None` when no pair survives (including lists with
/// fewer than two blocks or unparseable timestamps) rather than a
/// degenerate zero or infinite value.
#[must_use]
pub fn estimate_block_time(blocks: &[Block]) -> Option<String> {
    let mut total = 0.0;
    let mut surviving_pairs = 0u32;

    for pair in blocks.windows(2) {
        let (Some(current), Some(next)) = (pair[0].timestamp, pair[1].timestamp) else {
            continue;
        };

        #[allow(clippy::cast_precision_loss)]
        let delta = (current - next).num_milliseconds().abs() as f64 / 1000.0;

        if (MIN_DELTA_SECS..=MAX_DELTA_SECS).contains(&delta) {
            total += delta;
            surviving_pairs += 1;
        }
    }

    (surviving_pairs > 0).then(|| format!("{:.1}s", total / f64::from(surviving_pairs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn block_at(rfc3339: &str) -> Block {
        Block {
            timestamp: Some(
                DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc),
            ),
            ..Block::default()
        }
    }

    #[test]
    fn test_average_over_regular_intervals() {
        let blocks = vec![
            block_at("2024-05-01T12:00:06Z"),
            block_at("2024-05-01T12:00:04Z"),
            block_at("2024-05-01T12:00:02Z"),
            block_at("2024-05-01T12:00:00Z"),
        ];

        assert_eq!(estimate_block_time(&blocks), Some("2.0s".to_string()));
    }

    #[test]
    fn test_outlier_deltas_are_discarded() {
        // 2s pair, then a 60s gap that must not skew the mean.
        let blocks = vec![
            block_at("2024-05-01T12:01:02Z"),
            block_at("2024-05-01T12:01:00Z"),
            block_at("2024-05-01T12:00:00Z"),
        ];

        assert_eq!(estimate_block_time(&blocks), Some("2.0s".to_string()));
    }

    #[test]
    fn test_all_deltas_outside_window_is_no_estimate() {
        let blocks = vec![
            block_at("2024-05-01T13:00:00Z"),
            block_at("2024-05-01T12:30:00Z"),
            block_at("2024-05-01T12:00:00Z"),
        ];

        assert_eq!(estimate_block_time(&blocks), None);
    }

    #[test]
    fn test_identical_timestamps_are_discarded() {
        // Zero delta is below the representative window.
        let blocks = vec![block_at("2024-05-01T12:00:00Z"), block_at("2024-05-01T12:00:00Z")];

        assert_eq!(estimate_block_time(&blocks), None);
    }

    #[test]
    fn test_fewer_than_two_blocks_is_no_estimate() {
        assert_eq!(estimate_block_time(&[]), None);
        assert_eq!(estimate_block_time(&[block_at("2024-05-01T12:00:00Z")]), None);
    }

    #[test]
    fn test_unparseable_timestamp_skips_pair_without_aborting() {
        let blocks = vec![
            block_at("2024-05-01T12:00:04Z"),
            Block::default(), // no timestamp
            block_at("2024-05-01T12:00:02Z"),
            block_at("2024-05-01T12:00:00Z"),
        ];

        // Only the final adjacent pair survives.
        assert_eq!(estimate_block_time(&blocks), Some("2.0s".to_string()));
    }

    #[test]
    fn test_boundary_deltas_are_inclusive() {
        let blocks =
            vec![block_at("2024-05-01T12:00:10Z"), block_at("2024-05-01T12:00:00Z")];

        assert_eq!(estimate_block_time(&blocks), Some("10.0s".to_string()));
    }
}
