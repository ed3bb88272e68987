//! # bfc-check — Blob-published revocation status checking
//!
//! Determines whether a credential has been revoked, where the revocation
//! set is published on-chain as a padded Bloom-filter cascade inside blob
//! transaction data. The pipeline runs six strictly sequential stages:
//!
//! 1. Extract the status record from the credential (`bfc-vc`).
//! 2. Resolve the publisher's account address from the status id.
//! 3. Locate the newest qualifying self-addressed blob transaction
//!    (`bfc-chain`).
//! 4. Assemble the raw blob payloads in commitment order.
//! 5. Decode the field-element padding to recover the cascade bytes.
//! 6. Reconstruct the cascade and evaluate membership — with the polarity
//!    inversion made explicit: the cascade lists currently-valid
//!    credentials, so absence means revoked.
//!
//! Each stage boundary emits paired started/completed events to an
//! optional caller-supplied [`ProgressSink`]. Fail fast: the first stage
//! error aborts the run with no partial result. Nothing is cached or
//! shared between invocations.
//!
//! ## Example
//!
//! ```no_run
//! use bfc_check::{is_revoked, StatusCheckOptions};
//! use bfc_chain::{HttpChainProvider, ProviderConfig};
//! use bfc_vc::VerifiableCredential;
//! # use bfc_check::{BloomFilterCascade, CascadeError};
//! # struct MyCascade;
//! # impl BloomFilterCascade for MyCascade {
//! #     fn from_data_hex(_: &str) -> Result<Self, CascadeError> { Ok(MyCascade) }
//! #     fn has(&self, _: &str) -> bool { true }
//! #     fn level_count(&self) -> usize { 1 }
//! # }
//!
//! # async fn run(credential: VerifiableCredential) -> Result<(), Box<dyn std::error::Error>> {
//! let provider = HttpChainProvider::new(ProviderConfig::new(
//!     "indexing-api-key",
//!     "full-node-api-key",
//!     "https://api.sepolia.blobscan.com",
//! ))?;
//! let revoked =
//!     is_revoked::<_, MyCascade>(&credential, &provider, StatusCheckOptions::default())
//!         .await?;
//! # Ok(())
//! # }
//! ```

pub mod cascade;
pub mod checker;
pub mod error;
pub mod policy;
pub mod progress;

// Re-export primary types.
pub use cascade::{BloomFilterCascade, CascadeError};
pub use checker::{is_revoked, RevocationStatus, StatusCheckOptions, StatusChecker};
pub use error::StatusCheckError;
pub use policy::RevocationKeyPolicy;
pub use progress::{
    ProgressEvent, ProgressMetrics, ProgressPhase, ProgressReporter, ProgressSink, ProgressStep,
};

// Re-export the collaborating crates' primary types for one-import use.
pub use bfc_chain::{ChainDataProvider, DecodeOptions, HttpChainProvider, ProviderConfig};
pub use bfc_vc::{CredentialStatus, VerifiableCredential};
