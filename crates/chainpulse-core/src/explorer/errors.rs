use thiserror::Error;

/// Errors that can occur when calling the block-explorer API.
///
/// All variants are recovered locally by the aggregator: a failed call maps
/// to "no data" for its stage, never to a failed aggregation cycle.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExplorerError {
    /// Request exceeded the configured timeout duration.
    #[error("request timeout")]
    Timeout,

    /// Failed to establish a connection to the explorer endpoint.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Non-success HTTP status returned by the explorer.
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// Response body could not be parsed as the expected schema.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Network-level error from the underlying HTTP client.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
