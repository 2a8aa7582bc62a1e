//! Request handlers for the telemetry HTTP surface.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chainpulse_core::aggregator::Aggregator;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Optional caller identity for the user-transaction stage.
///
/// Both parameters must be present together for that stage to run; the
/// aggregator enforces this.
#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    pub address: Option<String>,
    pub contract: Option<String>,
}

/// Runs one aggregation cycle and returns its response.
///
/// Always HTTP 200: upstream failure is encoded in the body's
/// `success`/`fallback`/`error` fields, never in the status code.
pub async fn handle_metrics(
    State(aggregator): State<Arc<Aggregator>>,
    Query(query): Query<MetricsQuery>,
) -> impl IntoResponse {
    debug!(
        has_address = query.address.is_some(),
        has_contract = query.contract.is_some(),
        "telemetry cycle requested"
    );

    let response =
        aggregator.collect(query.address.as_deref(), query.contract.as_deref()).await;

    (StatusCode::OK, Json(response))
}

/// Liveness endpoint.
pub async fn handle_health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}
