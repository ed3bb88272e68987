//! Chain provider error types.

/// Errors from chain data provider calls.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// HTTP transport error (connection failure, timeout).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// Which provider endpoint was being called.
        endpoint: String,
        /// The underlying transport error.
        source: reqwest::Error,
    },

    /// The provider returned a non-success status or a JSON-RPC error.
    #[error("provider {endpoint} returned {status}: {body}")]
    Api {
        /// Which provider endpoint was being called.
        endpoint: String,
        /// HTTP status code of the response.
        status: u16,
        /// Response body excerpt or JSON-RPC error object.
        body: String,
    },

    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {reason}")]
    Deserialization {
        /// Which provider endpoint was being called.
        endpoint: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// The full node knows no transaction with the given hash.
    #[error("transaction not found: {tx_hash}")]
    TransactionNotFound {
        /// The hash that was looked up.
        tx_hash: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
