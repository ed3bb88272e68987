//! # Status check pipeline
//!
//! Orchestrates the six stages strictly sequentially — each stage
//! consumes the previous stage's output, so there is nothing to run
//! concurrently within one invocation. Distinct invocations share no
//! mutable state and may run concurrently over a shared provider.
//!
//! ## Polarity
//!
//! The cascade encodes the set of currently-valid (non-revoked)
//! credentials. Membership therefore means NOT revoked:
//! `is_revoked = !cascade.has(key)`. The inversion lives in exactly one
//! named place in [`StatusChecker::check`] — it is the single most
//! consequential correctness decision in this pipeline and must never be
//! buried in a double negative.
//!
//! ## Cancellation
//!
//! All remote work happens inside the returned future; dropping it stops
//! any further provider calls. There are no automatic retries — callers
//! needing retry-on-transient-failure wrap whole invocations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::Instrument as _;
use uuid::Uuid;

use bfc_chain::{
    assemble_blob_hex, decode_with_options, locate_blob_transaction, ChainDataProvider,
    DecodeOptions,
};
use bfc_vc::{extract_credential_status, resolve_publisher_account, VerifiableCredential};

use crate::cascade::BloomFilterCascade;
use crate::error::StatusCheckError;
use crate::policy::RevocationKeyPolicy;
use crate::progress::{ProgressMetrics, ProgressReporter, ProgressSink, ProgressStep};

/// Per-invocation options.
#[derive(Clone, Default)]
pub struct StatusCheckOptions {
    /// Observer for stage-boundary progress events.
    pub progress_sink: Option<Arc<dyn ProgressSink>>,
    /// Invocation id carried into the tracing span; random when absent.
    pub invocation_id: Option<Uuid>,
    /// How the cascade lookup key is derived from the status id.
    pub key_policy: RevocationKeyPolicy,
    /// Blob decoding conventions for this publisher.
    pub decode: DecodeOptions,
    /// Bound on how many transfer-page candidates the locator inspects.
    pub max_candidates: Option<usize>,
}

impl std::fmt::Debug for StatusCheckOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusCheckOptions")
            .field("progress_sink", &self.progress_sink.is_some())
            .field("invocation_id", &self.invocation_id)
            .field("key_policy", &self.key_policy)
            .field("decode", &self.decode)
            .field("max_candidates", &self.max_candidates)
            .finish()
    }
}

/// Result of a successful status check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevocationStatus {
    /// The verdict: true when the credential has been revoked.
    pub revoked: bool,
    /// The resolved publisher address.
    pub publisher_address: String,
    /// Hash of the blob transaction the revocation set was read from.
    pub transaction_hash: String,
    /// Number of blobs on that transaction.
    pub blob_count: usize,
    /// Cascade level count.
    pub level_count: usize,
}

/// The status-check pipeline over a chain data provider.
///
/// Holds no per-invocation state; one checker may serve concurrent
/// invocations when `P` is shareable.
#[derive(Debug)]
pub struct StatusChecker<P> {
    provider: P,
    options: StatusCheckOptions,
}

impl<P: ChainDataProvider> StatusChecker<P> {
    /// Build a checker with default options.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            options: StatusCheckOptions::default(),
        }
    }

    /// Build a checker with explicit options.
    pub fn with_options(provider: P, options: StatusCheckOptions) -> Self {
        Self { provider, options }
    }

    /// Run the full pipeline for one credential.
    pub async fn check<C: BloomFilterCascade>(
        &self,
        credential: &VerifiableCredential,
    ) -> Result<RevocationStatus, StatusCheckError> {
        let invocation_id = self.options.invocation_id.unwrap_or_else(Uuid::new_v4);
        let span = tracing::info_span!("status_check", %invocation_id);
        self.run::<C>(credential).instrument(span).await
    }

    async fn run<C: BloomFilterCascade>(
        &self,
        credential: &VerifiableCredential,
    ) -> Result<RevocationStatus, StatusCheckError> {
        let reporter = ProgressReporter::new(self.options.progress_sink.clone());

        reporter.started(ProgressStep::ExtractCredentialStatus);
        let status = extract_credential_status(credential)?;
        reporter.completed(ProgressStep::ExtractCredentialStatus, ProgressMetrics::default());

        reporter.started(ProgressStep::ResolvePublisherAddress);
        let address = resolve_publisher_account(&status)?;
        tracing::info!(address = %address, "publisher address resolved");
        reporter.completed(
            ProgressStep::ResolvePublisherAddress,
            ProgressMetrics {
                address: Some(address.to_string()),
                ..Default::default()
            },
        );

        reporter.started(ProgressStep::LocateBlobTransaction);
        let transaction =
            locate_blob_transaction(&self.provider, &address, self.options.max_candidates)
                .await?;
        reporter.completed(
            ProgressStep::LocateBlobTransaction,
            ProgressMetrics {
                transaction_hash: Some(transaction.hash.clone()),
                blob_count: Some(transaction.blob_versioned_hashes.len()),
                ..Default::default()
            },
        );

        reporter.started(ProgressStep::FetchBlobData);
        let blob_hex =
            assemble_blob_hex(&self.provider, &transaction.blob_versioned_hashes).await?;
        reporter.completed(
            ProgressStep::FetchBlobData,
            ProgressMetrics {
                blob_count: Some(transaction.blob_versioned_hashes.len()),
                ..Default::default()
            },
        );

        reporter.started(ProgressStep::DecodeBlobPayload);
        let payload = decode_with_options(&blob_hex, self.options.decode)?;
        reporter.completed(
            ProgressStep::DecodeBlobPayload,
            ProgressMetrics {
                payload_hex_len: Some(payload.len()),
                ..Default::default()
            },
        );

        reporter.started(ProgressStep::ReconstructCascade);
        let cascade = C::from_data_hex(&payload)?;
        reporter.completed(
            ProgressStep::ReconstructCascade,
            ProgressMetrics {
                level_count: Some(cascade.level_count()),
                ..Default::default()
            },
        );

        reporter.started(ProgressStep::CheckRevocation);
        let key = self.options.key_policy.derive_key(&status.id);
        // Polarity: the cascade lists currently-valid credentials, so
        // membership means NOT revoked.
        let is_listed_valid = cascade.has(key);
        let revoked = !is_listed_valid;
        tracing::info!(revoked, "revocation check finished");
        reporter.completed(
            ProgressStep::CheckRevocation,
            ProgressMetrics {
                is_revoked: Some(revoked),
                ..Default::default()
            },
        );

        Ok(RevocationStatus {
            revoked,
            publisher_address: address.to_string(),
            transaction_hash: transaction.hash,
            blob_count: transaction.blob_versioned_hashes.len(),
            level_count: cascade.level_count(),
        })
    }
}

/// Run one status check and return only the verdict.
pub async fn is_revoked<P: ChainDataProvider, C: BloomFilterCascade>(
    credential: &VerifiableCredential,
    provider: &P,
    options: StatusCheckOptions,
) -> Result<bool, StatusCheckError> {
    let checker = StatusChecker::with_options(provider, options);
    Ok(checker.check::<C>(credential).await?.revoked)
}
