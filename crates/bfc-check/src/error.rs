//! Top-level pipeline error.

use crate::cascade::CascadeError;

/// Terminal error of a status-check invocation.
///
/// Each variant corresponds to one pipeline stage; the wrapped error
/// carries the distinct kind and the offending value. The first failing
/// stage aborts the run — no partial results are returned.
#[derive(Debug, thiserror::Error)]
pub enum StatusCheckError {
    /// Credential status extraction failed (invalid format or payload,
    /// or no status record).
    #[error(transparent)]
    Extraction(#[from] bfc_vc::ExtractionError),

    /// The status id embeds no valid publisher address.
    #[error(transparent)]
    Address(#[from] bfc_vc::AddressError),

    /// No qualifying blob transaction, or a provider failure mid-scan.
    #[error(transparent)]
    Locate(#[from] bfc_chain::LocateError),

    /// Blob fetch or blob-count failure during assembly.
    #[error(transparent)]
    Assemble(#[from] bfc_chain::AssembleError),

    /// Strict decoding rejected misaligned blob data.
    #[error(transparent)]
    Decode(#[from] bfc_chain::DecodeError),

    /// Cascade reconstruction failed.
    #[error(transparent)]
    Cascade(#[from] CascadeError),
}
