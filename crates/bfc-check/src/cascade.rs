//! # Bloom-filter cascade seam
//!
//! The cascade itself is an external module: its level structure, salt
//! handling, and false-positive mathematics are not this crate's concern.
//! The pipeline consumes exactly two capabilities — build a handle from
//! the decoded payload, and test membership of a key — captured by the
//! [`BloomFilterCascade`] trait. The pipeline is generic over it, so any
//! cascade implementation plugs in without touching the stages.

/// Errors from cascade reconstruction.
#[derive(Debug, thiserror::Error)]
pub enum CascadeError {
    /// The payload could not be parsed into a cascade.
    #[error("cascade reconstruction failed: {reason}")]
    Reconstruction {
        /// Description of the parse failure.
        reason: String,
    },
}

/// An opaque Bloom-filter cascade handle.
///
/// Built once per invocation from the decoded `0x`-prefixed payload and
/// queried by entry key. Implementations encode the set of currently
/// valid (non-revoked) entries — callers must not assume membership means
/// revoked; the pipeline owns that inversion.
pub trait BloomFilterCascade: Sized {
    /// Reconstruct a cascade from the decoded payload hex.
    fn from_data_hex(payload_hex: &str) -> Result<Self, CascadeError>;

    /// Test membership of a derived revocation key.
    fn has(&self, key: &str) -> bool;

    /// Number of filter levels, for progress metrics.
    fn level_count(&self) -> usize;
}
