//! HTTP client for the block-explorer API.
//!
//! Thin wrapper around [`reqwest`] with bounded connect and request timeouts.
//! No call may block an aggregation cycle indefinitely, and there are no
//! retries: each cycle makes exactly one attempt per resource.

use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    config::ExplorerConfig,
    explorer::{
        errors::ExplorerError,
        types::{Block, BlockPage, Transaction, TransactionPage},
    },
};

const USER_AGENT: &str = concat!("chainpulse/", env!("CARGO_PKG_VERSION"));

/// Read-only client for one explorer deployment.
///
/// Stateless across cycles: holds only the connection pool and the
/// configured base URL and block window.
pub struct ExplorerClient {
    client: Client,
    base_url: String,
    blocks_window: usize,
}

impl ExplorerClient {
    /// Creates a client from the explorer configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to build.
    pub fn new(config: &ExplorerConfig) -> Result<Self, ExplorerError> {
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .use_rustls_tls()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                tracing::error!(error = %e, "failed to build explorer http client");
                ExplorerError::ConnectionFailed(format!("HTTP client build failed: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            blocks_window: config.blocks_window,
        })
    }

    /// Sends a GET request and parses the JSON response as `T`.
    ///
    /// # Errors
    ///
    /// - [`ExplorerError::Timeout`] if the request exceeds the configured timeout
    /// - [`ExplorerError::HttpError`] for non-success status codes
    /// - [`ExplorerError::InvalidResponse`] if the body does not match `T`
    /// - [`ExplorerError::ConnectionFailed`] / [`ExplorerError::Network`] otherwise
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ExplorerError> {
        let url = format!("{}{path}", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(Self::classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExplorerError::HttpError(status.as_u16()));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                ExplorerError::InvalidResponse(e.to_string())
            } else {
                Self::classify(e)
            }
        })
    }

    /// Fetches the recent-blocks window, most-recent-first.
    ///
    /// # Errors
    ///
    /// Propagates any [`ExplorerError`] from the underlying call.
    pub async fn recent_blocks(&self) -> Result<Vec<Block>, ExplorerError> {
        let page: BlockPage =
            self.get_json(&format!("/api/v2/blocks?limit={}", self.blocks_window)).await?;
        Ok(page.items)
    }

    /// Fetches the user's transactions directed at one contract, server-side
    /// filtered and bounded to the single most recent entry.
    ///
    /// # Errors
    ///
    /// Propagates any [`ExplorerError`] from the underlying call.
    pub async fn transactions_to(
        &self,
        address: &str,
        contract: &str,
    ) -> Result<Vec<Transaction>, ExplorerError> {
        let page: TransactionPage = self
            .get_json(&format!("/api/v2/addresses/{address}/transactions?to={contract}&limit=1"))
            .await?;
        Ok(page.items)
    }

    /// Maps a reqwest error to the closest [`ExplorerError`] variant,
    /// sanitizing connection details out of the message.
    fn classify(error: reqwest::Error) -> ExplorerError {
        if error.is_timeout() {
            ExplorerError::Timeout
        } else if error.is_connect() {
            ExplorerError::ConnectionFailed("connection refused or unreachable".to_string())
        } else {
            ExplorerError::Network(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplorerConfig;

    fn test_config(base_url: &str) -> ExplorerConfig {
        ExplorerConfig { base_url: base_url.to_string(), ..ExplorerConfig::default() }
    }

    #[tokio::test]
    async fn test_recent_blocks_parses_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v2/blocks?limit=100")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "items": [
                        { "number": 2, "timestamp": "2024-05-01T12:00:02Z",
                          "miner": { "hash": "0xaaaa" } },
                        { "number": 1, "timestamp": "2024-05-01T12:00:00Z",
                          "miner": { "hash": "0xbbbb" } }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = ExplorerClient::new(&test_config(&server.url())).unwrap();
        let blocks = client.recent_blocks().await.unwrap();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].number, Some(2));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v2/blocks?limit=100")
            .with_status(503)
            .create_async()
            .await;

        let client = ExplorerClient::new(&test_config(&server.url())).unwrap();
        let err = client.recent_blocks().await.unwrap_err();

        assert!(matches!(err, ExplorerError::HttpError(503)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v2/blocks?limit=100")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json at all")
            .create_async()
            .await;

        let client = ExplorerClient::new(&test_config(&server.url())).unwrap();
        let err = client.recent_blocks().await.unwrap_err();

        assert!(matches!(err, ExplorerError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_sanitized_connection_error() {
        let client = ExplorerClient::new(&test_config("http://127.0.0.1:1")).unwrap();
        let err = client.recent_blocks().await.unwrap_err();

        match err {
            ExplorerError::ConnectionFailed(msg) => {
                assert!(!msg.contains("127.0.0.1"), "message should not leak the address");
            }
            ExplorerError::Timeout => {}
            other => panic!("expected connection failure, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transactions_to_builds_filtered_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v2/addresses/0xuser/transactions?to=0xcontract&limit=1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "items": [{ "hash": "0x1" }] }).to_string())
            .create_async()
            .await;

        let client = ExplorerClient::new(&test_config(&server.url())).unwrap();
        let txs = client.transactions_to("0xuser", "0xcontract").await.unwrap();

        assert_eq!(txs.len(), 1);
        mock.assert_async().await;
    }
}
