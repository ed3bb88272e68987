//! # bfc-vc — Credential model for BFC status checking
//!
//! Data model and pure helpers for credentials whose revocation status is
//! published as a padded Bloom-filter cascade (BFC) in blob transaction
//! data. Provides:
//!
//! - **Credential structure** ([`VerifiableCredential`]) covering both the
//!   JSON-LD object form and the 3-segment compact-token form.
//! - **Status extraction** ([`extract_credential_status`]) that normalizes
//!   either form into a [`CredentialStatus`] record.
//! - **Publisher account resolution** ([`resolve_publisher_account`]) from
//!   the CAIP-10-style status id to a validated [`AccountAddress`].
//!
//! Everything in this crate is pure: no network access, no shared state.
//! Signature and proof verification are deliberately out of scope — only
//! the embedded status entry matters for the revocation pipeline.

pub mod address;
pub mod credential;
pub mod status;

// Re-export primary types.
pub use address::{
    is_hex_address, resolve_publisher_account, AccountAddress, AddressError, ADDRESS_HEX_LEN,
};
pub use credential::{
    ContextValue, CredentialStatus, JsonLdCredential, VerifiableCredential,
    BFC_STATUS_ENTRY_TYPE, STATUS_PURPOSE_REVOCATION,
};
pub use status::{extract_credential_status, ExtractionError};
