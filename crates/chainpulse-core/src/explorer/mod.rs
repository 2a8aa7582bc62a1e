//! Read-only client surface for the third-party block-explorer API.
//!
//! The explorer is the only upstream collaborator. Every call carries a
//! bounded timeout, and every failure is an expected outcome the aggregator
//! recovers from locally. Nothing in this module panics or retries.

pub mod client;
pub mod errors;
pub mod resolver;
pub mod types;

pub use client::ExplorerClient;
pub use errors::ExplorerError;
pub use resolver::StatsResolver;
