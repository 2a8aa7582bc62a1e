//! First-success resolution of the network-stats resource.
//!
//! Explorer deployments expose their stats resource under different path
//! versions. Rather than branching per deployment, the resolver walks an
//! ordered list of capability-equivalent candidate paths and short-circuits
//! on the first HTTP success. All-candidates-failed is an expected, common
//! outcome and maps to `None`, never to an error.

use tracing::{debug, warn};

use crate::explorer::{client::ExplorerClient, types::NetworkStats};

/// Ordered candidate paths for one logical resource.
///
/// Stateless across cycles: each [`resolve`](Self::resolve) call probes the
/// candidates fresh, one attempt each, inheriting the client's timeout.
pub struct StatsResolver {
    candidates: Vec<String>,
}

impl StatsResolver {
    /// Creates a resolver over the given candidate paths, tried in order.
    #[must_use]
    pub fn new(candidates: Vec<String>) -> Self {
        Self { candidates }
    }

    /// Attempts each candidate in priority order and returns the first
    /// successfully parsed payload.
    ///
    /// A failure of one candidate never prevents trying the next; if all
    /// candidates fail the resolver returns `None`.
    pub async fn resolve(&self, client: &ExplorerClient) -> Option<NetworkStats> {
        for candidate in &self.candidates {
            match client.get_json::<NetworkStats>(candidate).await {
                Ok(stats) => {
                    debug!(candidate = %candidate, "network stats resolved");
                    return Some(stats);
                }
                Err(e) => {
                    debug!(candidate = %candidate, error = %e, "stats candidate failed");
                }
            }
        }

        warn!(candidates = self.candidates.len(), "all stats candidates failed");
        None
    }
}
