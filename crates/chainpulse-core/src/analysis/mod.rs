//! Pure derivation components over the fetched upstream windows.
//!
//! Each component consumes request-scoped data and returns `None` instead of
//! a degenerate value when the input cannot support the metric. Nothing here
//! performs I/O; determinism over identical input is a tested property.

pub mod block_time;
pub mod transactions;
pub mod validators;

pub use block_time::estimate_block_time;
pub use transactions::summarize_latest;
pub use validators::{most_active_validator, ValidatorTally};
