//! # Revocation key derivation policy
//!
//! Publishers differ in how cascade entries are keyed: some insert the
//! full status id, others only its final colon-delimited segment (the
//! per-credential suffix). The policy is pluggable rather than
//! hard-coded; the default matches the dominant observed convention.

use serde::{Deserialize, Serialize};

/// How the cascade lookup key is derived from the status id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RevocationKeyPolicy {
    /// Use the full status id as the key (default).
    #[default]
    FullStatusId,
    /// Use the final colon-delimited segment of the status id.
    StatusIdSuffix,
}

impl RevocationKeyPolicy {
    /// Derive the cascade lookup key from a status id.
    pub fn derive_key<'a>(&self, status_id: &'a str) -> &'a str {
        match self {
            Self::FullStatusId => status_id,
            Self::StatusIdSuffix => status_id.rsplit(':').next().unwrap_or(status_id),
        }
    }
}
