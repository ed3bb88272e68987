//! # Blob assembler
//!
//! Fetches each blob's raw representation from the explorer, in the
//! transaction's commitment-hash order, and concatenates the normalized
//! hex into one buffer. Order matters: cascade serialization spans blob
//! boundaries in original blob order.
//!
//! Explorer bodies arrive as quoted hex strings (`"0x...."`); quotes and
//! the `0x` prefix are stripped before concatenation. Any fetch failure
//! aborts the whole operation — a partial buffer is never returned.

use crate::error::ChainError;
use crate::provider::{ChainDataProvider, MAX_BLOBS_PER_TX};

/// Errors from blob assembly.
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    /// Fetching one blob failed; the whole assembly is discarded.
    #[error("blob fetch failed for {versioned_hash}: {source}")]
    BlobFetchFailed {
        /// The commitment hash whose fetch failed.
        versioned_hash: String,
        /// The underlying provider error.
        #[source]
        source: ChainError,
    },

    /// The transaction carries more blobs than the supported maximum.
    #[error("transaction carries {count} blobs, maximum supported is {MAX_BLOBS_PER_TX}")]
    TooManyBlobs {
        /// Number of commitment hashes on the transaction.
        count: usize,
    },
}

/// Fetch and concatenate the blobs for `versioned_hashes`, in list order.
///
/// Returns the accumulated hex buffer without a `0x` prefix, ready for
/// the decoder.
pub async fn assemble_blob_hex<P: ChainDataProvider>(
    provider: &P,
    versioned_hashes: &[String],
) -> Result<String, AssembleError> {
    if versioned_hashes.len() > MAX_BLOBS_PER_TX {
        return Err(AssembleError::TooManyBlobs {
            count: versioned_hashes.len(),
        });
    }

    let mut buffer = String::new();
    for versioned_hash in versioned_hashes {
        let body = provider.get_blob_data(versioned_hash).await.map_err(|source| {
            AssembleError::BlobFetchFailed {
                versioned_hash: versioned_hash.clone(),
                source,
            }
        })?;
        buffer.push_str(normalize_blob_body(&body));
    }

    tracing::debug!(
        blob_count = versioned_hashes.len(),
        hex_len = buffer.len(),
        "blob data assembled"
    );
    Ok(buffer)
}

/// Strip surrounding whitespace, quotation marks, and the `0x` prefix
/// from an explorer response body.
fn normalize_blob_body(body: &str) -> &str {
    let trimmed = body.trim().trim_matches(|c| c == '"' || c == '\'');
    trimmed.strip_prefix("0x").unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfc_vc::AccountAddress;
    use std::collections::HashMap;

    use crate::provider::{TransactionDetail, TransferSummary};

    /// Provider serving canned blob bodies.
    struct BlobFixture {
        blobs: HashMap<String, String>,
    }

    impl ChainDataProvider for BlobFixture {
        async fn list_transfers(
            &self,
            _address: &AccountAddress,
        ) -> Result<Vec<TransferSummary>, ChainError> {
            Ok(vec![])
        }

        async fn get_transaction(
            &self,
            tx_hash: &str,
        ) -> Result<TransactionDetail, ChainError> {
            Err(ChainError::TransactionNotFound {
                tx_hash: tx_hash.to_string(),
            })
        }

        async fn get_blob_data(&self, versioned_hash: &str) -> Result<String, ChainError> {
            self.blobs
                .get(versioned_hash)
                .cloned()
                .ok_or_else(|| ChainError::Api {
                    endpoint: "explorer.blobData".to_string(),
                    status: 404,
                    body: format!("blob {versioned_hash} not found"),
                })
        }
    }

    fn fixture(blobs: &[(&str, &str)]) -> BlobFixture {
        BlobFixture {
            blobs: blobs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn hashes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn blobs_are_concatenated_in_list_order_not_sorted_order() {
        let chain = fixture(&[("0xzz", "\"0xaaaa\""), ("0xaa", "\"0xbbbb\"")]);
        // List order puts 0xzz first even though it sorts last.
        let buffer = assemble_blob_hex(&chain, &hashes(&["0xzz", "0xaa"]))
            .await
            .expect("assemble");
        assert_eq!(buffer, "aaaabbbb");
    }

    #[tokio::test]
    async fn quotes_and_prefix_are_stripped() {
        let chain = fixture(&[("0x01", "\"0xdeadbeef\"")]);
        let buffer = assemble_blob_hex(&chain, &hashes(&["0x01"]))
            .await
            .expect("assemble");
        assert_eq!(buffer, "deadbeef");
    }

    #[tokio::test]
    async fn unquoted_body_is_accepted() {
        let chain = fixture(&[("0x01", "0xdeadbeef")]);
        let buffer = assemble_blob_hex(&chain, &hashes(&["0x01"]))
            .await
            .expect("assemble");
        assert_eq!(buffer, "deadbeef");
    }

    #[tokio::test]
    async fn fetch_failure_aborts_and_discards_partial_buffer() {
        let chain = fixture(&[("0x01", "\"0xaaaa\"")]);
        let err = assemble_blob_hex(&chain, &hashes(&["0x01", "0xmissing"]))
            .await
            .expect_err("must abort");
        match err {
            AssembleError::BlobFetchFailed { versioned_hash, .. } => {
                assert_eq!(versioned_hash, "0xmissing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn more_than_max_blobs_is_rejected() {
        let chain = fixture(&[]);
        let seven: Vec<String> = (0..7).map(|i| format!("0x{i:02}")).collect();
        let err = assemble_blob_hex(&chain, &seven).await.expect_err("must fail");
        assert!(matches!(err, AssembleError::TooManyBlobs { count: 7 }));
    }

    #[tokio::test]
    async fn empty_hash_list_yields_empty_buffer() {
        let chain = fixture(&[]);
        let buffer = assemble_blob_hex(&chain, &[]).await.expect("assemble");
        assert!(buffer.is_empty());
    }
}
