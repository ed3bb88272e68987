//! # Chain data provider capability trait
//!
//! A single trait covering the three read-only upstream operations the
//! status-check pipeline needs: list an address's transfers newest first
//! (indexing service), fetch full transaction detail by hash (full node —
//! the indexer alone does not expose blob commitment hashes), and fetch
//! raw blob data by versioned hash (blob explorer).
//!
//! One implementation is chosen at construction — there are no scattered
//! per-call fallbacks. Production uses
//! [`HttpChainProvider`](crate::HttpChainProvider); tests implement the
//! trait over in-memory fixtures.

use bfc_vc::AccountAddress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ChainError;

/// Maximum number of blobs a single transaction can carry.
pub const MAX_BLOBS_PER_TX: usize = 6;

/// One row of an indexer transfer page, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferSummary {
    /// Transaction hash.
    pub hash: String,
    /// Sender address.
    pub from: String,
    /// Recipient address, if any (contract creations have none).
    pub to: Option<String>,
    /// Block timestamp from the indexer's transfer metadata, if provided.
    pub block_timestamp: Option<DateTime<Utc>>,
}

/// Full transaction detail from the full-node provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDetail {
    /// Transaction hash.
    pub hash: String,
    /// Sender address.
    pub from: String,
    /// Recipient address, if any.
    pub to: Option<String>,
    /// Blob commitment identifiers, in transaction order. Empty for
    /// non-blob transactions.
    pub blob_versioned_hashes: Vec<String>,
}

impl TransactionDetail {
    /// Whether the transaction follows the self-publication convention
    /// (sender == recipient). Address casing is not significant.
    pub fn is_self_addressed(&self) -> bool {
        self.to
            .as_deref()
            .is_some_and(|to| to.eq_ignore_ascii_case(&self.from))
    }

    /// Whether the transaction carries at least one blob.
    pub fn carries_blobs(&self) -> bool {
        !self.blob_versioned_hashes.is_empty()
    }
}

/// Read-only access to the chain data sources behind the pipeline.
///
/// All operations are suspending and side-effect free. Implementations
/// must be safe to share across invocations (`&self` receivers only);
/// nothing is cached between calls.
#[allow(async_fn_in_trait)]
pub trait ChainDataProvider {
    /// Fetch one newest-first page of external transfers sent by `address`
    /// to itself. No further pagination is attempted by design.
    async fn list_transfers(
        &self,
        address: &AccountAddress,
    ) -> Result<Vec<TransferSummary>, ChainError>;

    /// Fetch full transaction detail, including blob versioned hashes.
    async fn get_transaction(&self, tx_hash: &str) -> Result<TransactionDetail, ChainError>;

    /// Fetch the raw blob data body for a versioned hash. The body is
    /// returned as received (typically a quoted `0x`-prefixed hex string);
    /// normalization is the assembler's job.
    async fn get_blob_data(&self, versioned_hash: &str) -> Result<String, ChainError>;
}

impl<P: ChainDataProvider> ChainDataProvider for &P {
    async fn list_transfers(
        &self,
        address: &AccountAddress,
    ) -> Result<Vec<TransferSummary>, ChainError> {
        (**self).list_transfers(address).await
    }

    async fn get_transaction(&self, tx_hash: &str) -> Result<TransactionDetail, ChainError> {
        (**self).get_transaction(tx_hash).await
    }

    async fn get_blob_data(&self, versioned_hash: &str) -> Result<String, ChainError> {
        (**self).get_blob_data(versioned_hash).await
    }
}
