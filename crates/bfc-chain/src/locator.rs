//! # Blob transaction locator
//!
//! Finds the publisher's newest qualifying blob transaction: sent by the
//! publisher address, self-addressed (sender == recipient), carrying at
//! least one blob commitment hash.
//!
//! The search is a lazy, restartable candidate scan: one newest-first
//! transfer page is fetched up front, then full transaction detail is
//! fetched per candidate, strictly in page order and one at a time —
//! never as a concurrent fan-out, since precedence is
//! newest-transaction-wins. The scan stops at the first match. Callers
//! can bound how many candidates are inspected without changing the
//! algorithm.
//!
//! A provider error mid-scan aborts the whole locate: silently skipping
//! a failed candidate could return an older transaction than the newest
//! qualifying one.

use bfc_vc::AccountAddress;
use serde::{Deserialize, Serialize};

use crate::error::ChainError;
use crate::provider::{ChainDataProvider, TransactionDetail, TransferSummary};

/// The locator's result: the qualifying transaction and its ordered blob
/// commitment hashes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobTransaction {
    /// Transaction hash.
    pub hash: String,
    /// Blob commitment identifiers in transaction order.
    pub blob_versioned_hashes: Vec<String>,
}

/// Errors from the locate operation.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    /// The transfer page was exhausted (or the candidate bound reached)
    /// without a qualifying transaction. No further pagination is
    /// attempted by design.
    #[error("no qualifying blob transaction for address {address}")]
    NoQualifyingTransaction {
        /// The publisher address that was scanned.
        address: String,
    },

    /// A provider call failed mid-scan.
    #[error(transparent)]
    Provider(#[from] ChainError),
}

/// Lazy scan over one newest-first transfer page.
///
/// Detail fetches happen on demand, one candidate per [`next_detail`]
/// call, so a caller that stops early never pays for the rest of the
/// page.
///
/// [`next_detail`]: CandidateScan::next_detail
pub struct CandidateScan<'a, P> {
    provider: &'a P,
    candidates: std::vec::IntoIter<TransferSummary>,
}

impl<'a, P: ChainDataProvider> CandidateScan<'a, P> {
    /// Fetch the transfer page and set up the scan.
    pub async fn start(provider: &'a P, address: &AccountAddress) -> Result<Self, ChainError> {
        let page = provider.list_transfers(address).await?;
        tracing::debug!(address = %address, candidates = page.len(), "transfer page fetched");
        Ok(Self {
            provider,
            candidates: page.into_iter(),
        })
    }

    /// Advance to the next candidate and fetch its full detail.
    /// Returns `None` when the page is exhausted.
    pub async fn next_detail(&mut self) -> Option<Result<TransactionDetail, ChainError>> {
        let summary = self.candidates.next()?;
        Some(self.provider.get_transaction(&summary.hash).await)
    }

    /// Candidates left on the page.
    pub fn remaining(&self) -> usize {
        self.candidates.len()
    }
}

/// Locate the newest qualifying blob transaction for `address`.
///
/// `max_candidates` bounds how many page entries are inspected; `None`
/// inspects the whole page. Read-only and idempotent.
pub async fn locate_blob_transaction<P: ChainDataProvider>(
    provider: &P,
    address: &AccountAddress,
    max_candidates: Option<usize>,
) -> Result<BlobTransaction, LocateError> {
    let mut scan = CandidateScan::start(provider, address).await?;
    let mut inspected = 0usize;

    while let Some(detail) = scan.next_detail().await {
        // Fail fast on provider errors; only non-qualifying candidates
        // are skipped.
        let detail = detail?;
        inspected += 1;

        if detail.is_self_addressed() && detail.carries_blobs() {
            tracing::info!(
                tx_hash = %detail.hash,
                blob_count = detail.blob_versioned_hashes.len(),
                inspected,
                "qualifying blob transaction located"
            );
            return Ok(BlobTransaction {
                hash: detail.hash,
                blob_versioned_hashes: detail.blob_versioned_hashes,
            });
        }

        if max_candidates.is_some_and(|max| inspected >= max) {
            break;
        }
    }

    Err(LocateError::NoQualifyingTransaction {
        address: address.to_string(),
    })
}
