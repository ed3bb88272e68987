//! # HTTP chain data provider
//!
//! Production [`ChainDataProvider`] implementation over three upstream
//! HTTP services:
//!
//! - **Indexer** — `alchemy_getAssetTransfers`-style JSON-RPC for the
//!   newest-first transfer page (the query already filters to external
//!   transfers where sender and recipient are the publisher address).
//! - **Full node** — `eth_getTransactionByHash` JSON-RPC for transaction
//!   detail including `blobVersionedHashes`.
//! - **Blob explorer** — Blobscan-style REST, `GET /blobs/{hash}/data`,
//!   body is a quoted hex string.
//!
//! ## Error Handling
//!
//! HTTP failures map to [`ChainError`] with diagnostic context: the
//! logical endpoint name, the HTTP status, and a response body excerpt.
//! JSON-RPC `error` members are surfaced as [`ChainError::Api`].
//!
//! ## Timeout & Retry
//!
//! One per-request timeout from [`ProviderConfig`]. Retries are NOT built
//! in — the pipeline is deliberately retry-free and callers wrap whole
//! invocations if they need retry-on-transient-failure.

use std::time::Duration;

use bfc_vc::AccountAddress;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::config::ProviderConfig;
use crate::error::ChainError;
use crate::provider::{ChainDataProvider, TransactionDetail, TransferSummary};

/// HTTP implementation of [`ChainDataProvider`].
///
/// `Send + Sync`; a single instance may be shared across concurrent
/// invocations, or one may be built per invocation — the provider holds
/// no per-invocation state.
#[derive(Debug)]
pub struct HttpChainProvider {
    client: reqwest::Client,
    indexer_url: String,
    node_url: String,
    explorer_base_url: String,
}

impl HttpChainProvider {
    /// Build a provider from configuration. Validates the configuration
    /// and constructs the shared HTTP client.
    pub fn new(config: ProviderConfig) -> Result<Self, ChainError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| ChainError::Http {
                endpoint: "client_builder".to_string(),
                source,
            })?;

        let indexer_url = format!(
            "{}/{}",
            config.indexer_base_url.trim_end_matches('/'),
            config.indexing_api_key
        );
        let node_url = format!(
            "{}/{}",
            config.node_base_url.trim_end_matches('/'),
            config.full_node_api_key
        );
        let explorer_base_url = config.blob_explorer_base_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            indexer_url,
            node_url,
            explorer_base_url,
        })
    }

    /// Issue a JSON-RPC call and return the `result` member.
    async fn rpc_call(
        &self,
        url: &str,
        endpoint: &'static str,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ChainError> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|source| ChainError::Http {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChainError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let envelope: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| ChainError::Deserialization {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                })?;

        if let Some(error) = envelope.get("error") {
            return Err(ChainError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: error.to_string(),
            });
        }

        Ok(envelope
            .get("result")
            .cloned()
            .unwrap_or(serde_json::Value::Null))
    }
}

// ── Indexer response mapping ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TransfersResult {
    #[serde(default)]
    transfers: Vec<TransferRow>,
}

#[derive(Debug, Deserialize)]
struct TransferRow {
    hash: String,
    from: String,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    metadata: Option<TransferMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferMetadata {
    #[serde(default)]
    block_timestamp: Option<DateTime<Utc>>,
}

// ── Node response mapping ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRow {
    hash: String,
    from: String,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    blob_versioned_hashes: Option<Vec<String>>,
}

impl ChainDataProvider for HttpChainProvider {
    async fn list_transfers(
        &self,
        address: &AccountAddress,
    ) -> Result<Vec<TransferSummary>, ChainError> {
        tracing::debug!(address = %address, "listing transfers from indexer");

        let params = serde_json::json!([{
            "fromAddress": address.as_str(),
            "toAddress": address.as_str(),
            "category": ["external"],
            "order": "desc",
            "withMetadata": true,
            "excludeZeroValue": false,
        }]);

        let result = self
            .rpc_call(
                &self.indexer_url,
                "indexer.getAssetTransfers",
                "alchemy_getAssetTransfers",
                params,
            )
            .await?;

        let page: TransfersResult =
            serde_json::from_value(result).map_err(|e| ChainError::Deserialization {
                endpoint: "indexer.getAssetTransfers".to_string(),
                reason: e.to_string(),
            })?;

        Ok(page
            .transfers
            .into_iter()
            .map(|row| TransferSummary {
                hash: row.hash,
                from: row.from,
                to: row.to,
                block_timestamp: row.metadata.and_then(|m| m.block_timestamp),
            })
            .collect())
    }

    async fn get_transaction(&self, tx_hash: &str) -> Result<TransactionDetail, ChainError> {
        tracing::debug!(tx_hash, "fetching transaction detail from full node");

        let result = self
            .rpc_call(
                &self.node_url,
                "node.getTransactionByHash",
                "eth_getTransactionByHash",
                serde_json::json!([tx_hash]),
            )
            .await?;

        if result.is_null() {
            return Err(ChainError::TransactionNotFound {
                tx_hash: tx_hash.to_string(),
            });
        }

        let row: TransactionRow =
            serde_json::from_value(result).map_err(|e| ChainError::Deserialization {
                endpoint: "node.getTransactionByHash".to_string(),
                reason: e.to_string(),
            })?;

        Ok(TransactionDetail {
            hash: row.hash,
            from: row.from,
            to: row.to,
            blob_versioned_hashes: row.blob_versioned_hashes.unwrap_or_default(),
        })
    }

    async fn get_blob_data(&self, versioned_hash: &str) -> Result<String, ChainError> {
        tracing::debug!(versioned_hash, "fetching blob data from explorer");

        let url = format!("{}/blobs/{versioned_hash}/data", self.explorer_base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ChainError::Http {
                endpoint: "explorer.blobData".to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChainError::Api {
                endpoint: "explorer.blobData".to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response.text().await.map_err(|source| ChainError::Http {
            endpoint: "explorer.blobData".to_string(),
            source,
        })
    }
}
