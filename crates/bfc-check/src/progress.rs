//! # Progress reporting protocol
//!
//! Cross-cutting observer invoked at every stage boundary. The sink is
//! caller-supplied and optional: absence is a no-op inside
//! [`ProgressReporter`], never an ad hoc null check at call sites. Sink
//! methods return `()` so a sink can never abort the pipeline.
//!
//! Every `Started` on the success path has exactly one matching
//! `Completed` for the same step, with no steps skipped. On a stage
//! failure the failing step's `Completed` is not emitted and the run
//! aborts.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgressStep {
    /// Normalize the credential into a status record.
    ExtractCredentialStatus,
    /// Derive the publisher's account address from the status id.
    ResolvePublisherAddress,
    /// Find the newest qualifying blob transaction.
    LocateBlobTransaction,
    /// Fetch and concatenate the raw blob payloads.
    FetchBlobData,
    /// Strip the field-element padding from the blob hex.
    DecodeBlobPayload,
    /// Rebuild the cascade handle from the decoded payload.
    ReconstructCascade,
    /// Evaluate membership and apply the polarity inversion.
    CheckRevocation,
}

impl ProgressStep {
    /// All steps in pipeline order.
    pub const ALL: [ProgressStep; 7] = [
        Self::ExtractCredentialStatus,
        Self::ResolvePublisherAddress,
        Self::LocateBlobTransaction,
        Self::FetchBlobData,
        Self::DecodeBlobPayload,
        Self::ReconstructCascade,
        Self::CheckRevocation,
    ];
}

impl fmt::Display for ProgressStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtractCredentialStatus => write!(f, "extractCredentialStatus"),
            Self::ResolvePublisherAddress => write!(f, "resolvePublisherAddress"),
            Self::LocateBlobTransaction => write!(f, "locateBlobTransaction"),
            Self::FetchBlobData => write!(f, "fetchBlobData"),
            Self::DecodeBlobPayload => write!(f, "decodeBlobPayload"),
            Self::ReconstructCascade => write!(f, "reconstructCascade"),
            Self::CheckRevocation => write!(f, "checkRevocation"),
        }
    }
}

/// Whether a step is beginning or has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgressPhase {
    /// The step is about to run.
    Started,
    /// The step finished successfully.
    Completed,
}

/// Optional per-step metrics attached to `Completed` events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressMetrics {
    /// Resolved publisher address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Located transaction hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    /// Number of blobs on the located transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_count: Option<usize>,
    /// Decoded payload length in hex characters (including the prefix).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_hex_len: Option<usize>,
    /// Cascade level count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_count: Option<usize>,
    /// The final verdict.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_revoked: Option<bool>,
}

impl ProgressMetrics {
    /// Whether no metric is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One progress event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    /// Which pipeline stage.
    pub step: ProgressStep,
    /// Started or completed.
    pub phase: ProgressPhase,
    /// Metrics, populated on completion where applicable.
    #[serde(default, skip_serializing_if = "ProgressMetrics::is_empty")]
    pub metrics: ProgressMetrics,
}

/// Caller-supplied observer for pipeline progress.
///
/// Implementations must be cheap and must not block: events are emitted
/// inline between stages. Reporting is best-effort by construction — the
/// method returns `()`.
pub trait ProgressSink: Send + Sync {
    /// Receive one progress event.
    fn on_progress(&self, event: &ProgressEvent);
}

/// Emits progress events to an optional sink.
///
/// With no sink attached every emit is a no-op.
#[derive(Clone, Default)]
pub struct ProgressReporter {
    sink: Option<Arc<dyn ProgressSink>>,
}

impl ProgressReporter {
    /// Wrap an optional sink.
    pub fn new(sink: Option<Arc<dyn ProgressSink>>) -> Self {
        Self { sink }
    }

    /// A reporter that drops every event.
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    /// Emit a `Started` event for `step`.
    pub fn started(&self, step: ProgressStep) {
        self.emit(step, ProgressPhase::Started, ProgressMetrics::default());
    }

    /// Emit a `Completed` event for `step` with its metrics.
    pub fn completed(&self, step: ProgressStep, metrics: ProgressMetrics) {
        self.emit(step, ProgressPhase::Completed, metrics);
    }

    fn emit(&self, step: ProgressStep, phase: ProgressPhase, metrics: ProgressMetrics) {
        if let Some(sink) = &self.sink {
            sink.on_progress(&ProgressEvent {
                step,
                phase,
                metrics,
            });
        }
    }
}

impl fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("attached", &self.sink.is_some())
            .finish()
    }
}
