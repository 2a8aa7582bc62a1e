//! Aggregation orchestrator and fallback policy.
//!
//! One [`Aggregator::collect`] call is one aggregation cycle: resolve the
//! network stats, fetch the recent-blocks window, conditionally fetch the
//! user's latest transaction, derive the computed metrics, and assemble the
//! response. Every stage is independently fault-tolerant; the worst case is
//! a complete placeholder response, never an error surfaced to the caller.

use chrono::{SecondsFormat, Utc};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::{
    analysis::{estimate_block_time, most_active_validator, summarize_latest},
    config::{AppConfig, PlaceholderSet},
    explorer::{
        types::{Block, Magnitude, NetworkStats, Transaction},
        ExplorerClient, ExplorerError, StatsResolver,
    },
    format::format_compact,
    types::{MetricsData, MetricsResponse},
};

/// Failure of an entire aggregation cycle.
///
/// Stage-level failures are recovered in place; this error exists only for
/// the full-failure path, which the aggregator converts into a placeholder
/// response before returning.
#[derive(Error, Debug)]
pub enum AggregateError {
    /// Neither the stats resolver nor the blocks fetch returned a usable
    /// payload.
    #[error("no upstream source returned a usable payload")]
    Unavailable,
}

/// Orchestrates one aggregation cycle per inbound request.
///
/// Holds no mutable state: the client's connection pool and the injected
/// placeholder set are the only cross-request data, both immutable.
pub struct Aggregator {
    client: ExplorerClient,
    resolver: StatsResolver,
    placeholders: PlaceholderSet,
}

impl Aggregator {
    /// Builds an aggregator from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the explorer HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ExplorerError> {
        Ok(Self {
            client: ExplorerClient::new(&config.explorer)?,
            resolver: StatsResolver::new(config.explorer.stats_candidates.clone()),
            placeholders: config.placeholders.clone(),
        })
    }

    /// Runs one aggregation cycle and always returns a well-formed response.
    ///
    /// The user-transaction stage runs only when both `address` and
    /// `contract` are supplied; its outcome never affects `success`.
    pub async fn collect(
        &self,
        address: Option<&str>,
        contract: Option<&str>,
    ) -> MetricsResponse {
        match self.live_metrics(address, contract).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "aggregation cycle failed, serving placeholder response");
                self.placeholder_response(&e.to_string())
            }
        }
    }

    /// Fetches all sources concurrently and assembles the live response.
    async fn live_metrics(
        &self,
        address: Option<&str>,
        contract: Option<&str>,
    ) -> Result<MetricsResponse, AggregateError> {
        // The three fetches have no data dependency on each other; results
        // land in independent variables and merge only at assembly.
        let (stats, blocks, user_txs) = tokio::join!(
            self.resolver.resolve(&self.client),
            self.fetch_blocks(),
            self.fetch_user_transactions(address, contract),
        );

        if stats.is_none() && blocks.is_none() {
            return Err(AggregateError::Unavailable);
        }

        Ok(self.assemble(stats, blocks, user_txs))
    }

    async fn fetch_blocks(&self) -> Option<Vec<Block>> {
        match self.client.recent_blocks().await {
            Ok(blocks) => {
                debug!(count = blocks.len(), "recent blocks fetched");
                Some(blocks)
            }
            Err(e) => {
                warn!(error = %e, "blocks fetch failed");
                None
            }
        }
    }

    async fn fetch_user_transactions(
        &self,
        address: Option<&str>,
        contract: Option<&str>,
    ) -> Option<Vec<Transaction>> {
        let (address, contract) = address.zip(contract)?;

        match self.client.transactions_to(address, contract).await {
            Ok(transactions) => Some(transactions),
            Err(e) => {
                warn!(error = %e, "user transaction fetch failed");
                None
            }
        }
    }

    fn assemble(
        &self,
        stats: Option<NetworkStats>,
        blocks: Option<Vec<Block>>,
        user_txs: Option<Vec<Transaction>>,
    ) -> MetricsResponse {
        let p = &self.placeholders;
        let blocks_ref = blocks.as_deref().unwrap_or_default();

        let block_time =
            estimate_block_time(blocks_ref).unwrap_or_else(|| p.block_time.clone());

        let (most_active, validator_address, validator_blocks) =
            match most_active_validator(blocks_ref) {
                Some(tally) => {
                    (tally.display_address, Some(tally.address), tally.blocks_produced)
                }
                None => (p.validator.clone(), None, 0),
            };

        let gas_price = stats
            .as_ref()
            .and_then(|s| s.gas_prices.as_ref())
            .and_then(|g| g.average)
            .map_or_else(|| p.gas_price.clone(), |avg| avg.to_string());

        let data = MetricsData {
            block_time,
            total_blocks: self
                .compact_or(stats.as_ref().and_then(|s| s.total_blocks.as_ref()), &p.total_blocks),
            total_transactions: self.compact_or(
                stats.as_ref().and_then(|s| s.total_transactions.as_ref()),
                &p.total_transactions,
            ),
            total_addresses: self.compact_or(
                stats.as_ref().and_then(|s| s.total_addresses.as_ref()),
                &p.total_addresses,
            ),
            most_active_validator: most_active,
            validator_address,
            validator_blocks,
            gas_price,
            last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            user_metrics: user_txs.as_deref().and_then(summarize_latest),
        };

        // At least one primary source was usable, or live_metrics would have
        // bailed out before assembly.
        MetricsResponse {
            success: true,
            data,
            timestamp: Utc::now().timestamp_millis(),
            error: None,
            fallback: None,
        }
    }

    /// Formats a raw magnitude compactly, substituting the placeholder when
    /// the value is absent or non-displayable.
    fn compact_or(&self, value: Option<&Magnitude>, placeholder: &str) -> String {
        value
            .and_then(Magnitude::as_f64)
            .and_then(format_compact)
            .unwrap_or_else(|| placeholder.to_string())
    }

    /// The documented worst case: a complete, well-formed response built
    /// entirely from the placeholder set.
    fn placeholder_response(&self, error: &str) -> MetricsResponse {
        let p = &self.placeholders;

        MetricsResponse {
            success: false,
            data: MetricsData {
                block_time: p.block_time.clone(),
                total_blocks: p.total_blocks.clone(),
                total_transactions: p.total_transactions.clone(),
                total_addresses: p.total_addresses.clone(),
                most_active_validator: p.validator_unavailable.clone(),
                validator_address: None,
                validator_blocks: 0,
                gas_price: p.gas_price.clone(),
                last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                user_metrics: None,
            },
            timestamp: Utc::now().timestamp_millis(),
            error: Some(error.to_string()),
            fallback: Some(true),
        }
    }
}
