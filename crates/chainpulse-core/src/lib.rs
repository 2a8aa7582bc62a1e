//! # Chainpulse Core
//!
//! Core library for the chainpulse chain-telemetry aggregator.
//!
//! This crate provides the foundational components for:
//!
//! - **[`explorer`]**: Read-only client for the third-party block-explorer API,
//!   including the multi-candidate stats resolver with first-success failover.
//!
//! - **[`analysis`]**: Pure derivation components fed by the fetched block and
//!   transaction windows: block-time estimation, validator activity tallying,
//!   and latest-transaction summarization.
//!
//! - **[`aggregator`]**: The orchestrator that sequences the upstream fetches,
//!   runs the analysis components, and assembles the unified response with a
//!   placeholder fallback policy for partial or total upstream outage.
//!
//! - **[`format`]**: Compact human-readable rendering of chain magnitudes.
//!
//! - **[`config`]**: Layered application configuration with validation.
//!
//! ## Request Flow
//!
//! ```text
//! Client Request (GET /api/metrics)
//!       │
//!       ▼
//! ┌──────────────┐
//! │  Aggregator  │
//! └──────┬───────┘
//!        │ tokio::join!
//!   ┌────┼──────────────┐
//!   ▼    ▼              ▼
//! Stats  Blocks     User txs (only if address+contract supplied)
//! (resolver,        │
//!  4 candidates)    │
//!   │    │          │
//!   │    ├── BlockTime Estimator
//!   │    └── Validator Analyzer
//!   │               └── Transaction Summarizer
//!   ▼    ▼              ▼
//! ┌──────────────────────────┐
//! │ Assembly (Formatter +    │
//! │ per-field placeholders)  │
//! └──────────┬───────────────┘
//!            ▼
//!    MetricsResponse (always HTTP 200)
//! ```
//!
//! Every aggregation cycle is request-scoped: there is no cross-request cache
//! and no background refresh loop. A total upstream outage still produces a
//! syntactically valid response carrying the configured placeholder set.

pub mod aggregator;
pub mod analysis;
pub mod config;
pub mod explorer;
pub mod format;
pub mod types;
