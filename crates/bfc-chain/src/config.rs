//! # Provider configuration
//!
//! Configuration for the HTTP chain data provider: API keys for the
//! indexing service and the full-node provider, plus the blob explorer
//! base URL. Base URLs for the keyed services default to the public
//! Sepolia endpoints and are overridable, which is also how the wiremock
//! integration tests point the provider at a local mock server.

use serde::{Deserialize, Serialize};

/// Default transaction-indexer base URL (API key is appended as a path
/// segment).
pub const DEFAULT_INDEXER_BASE_URL: &str = "https://eth-sepolia.g.alchemy.com/v2";

/// Default full-node base URL (API key is appended as a path segment).
pub const DEFAULT_NODE_BASE_URL: &str = "https://sepolia.infura.io/v3";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors from provider configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required API key is empty.
    #[error("missing API key: {which}")]
    MissingApiKey {
        /// Which key is missing (`indexing` or `full_node`).
        which: &'static str,
    },

    /// A base URL could not be parsed.
    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl {
        /// The offending URL string.
        url: String,
        /// Description of the parse failure.
        reason: String,
    },
}

/// Configuration for [`HttpChainProvider`](crate::HttpChainProvider).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key for the transaction-indexing service.
    pub indexing_api_key: String,
    /// API key for the full-node provider.
    pub full_node_api_key: String,
    /// Base URL of the blob explorer (e.g. `https://api.sepolia.blobscan.com`).
    pub blob_explorer_base_url: String,
    /// Indexer base URL; the API key is appended as a path segment.
    pub indexer_base_url: String,
    /// Full-node base URL; the API key is appended as a path segment.
    pub node_base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Create a configuration with default base URLs and timeout.
    pub fn new(
        indexing_api_key: impl Into<String>,
        full_node_api_key: impl Into<String>,
        blob_explorer_base_url: impl Into<String>,
    ) -> Self {
        Self {
            indexing_api_key: indexing_api_key.into(),
            full_node_api_key: full_node_api_key.into(),
            blob_explorer_base_url: blob_explorer_base_url.into(),
            indexer_base_url: DEFAULT_INDEXER_BASE_URL.to_string(),
            node_base_url: DEFAULT_NODE_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Override the indexer base URL.
    pub fn with_indexer_base_url(mut self, url: impl Into<String>) -> Self {
        self.indexer_base_url = url.into();
        self
    }

    /// Override the full-node base URL.
    pub fn with_node_base_url(mut self, url: impl Into<String>) -> Self {
        self.node_base_url = url.into();
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Validate keys and URLs before any client is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indexing_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey { which: "indexing" });
        }
        if self.full_node_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey { which: "full_node" });
        }
        for url in [
            &self.blob_explorer_base_url,
            &self.indexer_base_url,
            &self.node_base_url,
        ] {
            url::Url::parse(url).map_err(|e| ConfigError::InvalidBaseUrl {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}
