//! # Verifiable Credential structure with BFC status entries
//!
//! Defines the credential envelope accepted by the status-check pipeline,
//! following the W3C VC Data Model conventions for field naming.
//!
//! A credential arrives in exactly one of two forms:
//!
//! - **JSON-LD object** — carries the [`CredentialStatus`] record inline
//!   under `credentialStatus`, discriminated by the `@context` member.
//! - **Compact token** — a 3-segment, dot-delimited, base64-encoded signed
//!   representation whose decoded middle segment carries the same record.
//!
//! The envelope structure is rigid where the pipeline depends on it
//! (`@context`, `credentialStatus`), while the remaining credential body is
//! intentionally extensible per the W3C specification.
//!
//! ## Field Naming
//!
//! Serde rename attributes map between Rust snake_case and the on-wire VC
//! JSON field names (camelCase / `@`-prefixed).

use serde::{Deserialize, Serialize};

/// The `type` value of a BFC status entry.
pub const BFC_STATUS_ENTRY_TYPE: &str = "BFCStatusEntry";

/// The only `statusPurpose` the pipeline evaluates.
pub const STATUS_PURPOSE_REVOCATION: &str = "revocation";

/// The credential status record embedded in a credential.
///
/// The `id` is a CAIP-10-style colon-delimited string embedding exactly one
/// chain account address segment; [`crate::resolve_publisher_account`]
/// recovers that segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialStatus {
    /// Status entry identifier (colon-delimited, embeds the publisher's
    /// chain address).
    pub id: String,

    /// Status entry type. Expected to be [`BFC_STATUS_ENTRY_TYPE`].
    #[serde(rename = "type")]
    pub status_type: String,

    /// Purpose of the entry. Expected to be [`STATUS_PURPOSE_REVOCATION`].
    #[serde(rename = "statusPurpose")]
    pub status_purpose: String,

    /// CAIP-10 account id of the revocation-set publisher.
    #[serde(rename = "statusPublisher")]
    pub status_publisher: String,
}

/// JSON-LD `@context` value — either a single string or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// Single context URI string.
    Single(String),
    /// Array of context URI strings or objects.
    Array(Vec<serde_json::Value>),
}

impl Default for ContextValue {
    fn default() -> Self {
        Self::Array(vec![serde_json::Value::String(
            "https://www.w3.org/2018/credentials/v1".to_string(),
        )])
    }
}

/// A JSON-LD credential carrying its status record inline.
///
/// Only the members the pipeline reads are modeled as fields; the rest of
/// the credential body (issuer, subject, proofs, ...) is preserved
/// untouched in `rest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonLdCredential {
    /// JSON-LD context URIs. Presence of this member is what discriminates
    /// the object form from other shapes.
    #[serde(rename = "@context")]
    pub context: ContextValue,

    /// The embedded status record, if any.
    #[serde(
        rename = "credentialStatus",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub credential_status: Option<CredentialStatus>,

    /// Remaining credential body, carried through untouched.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

/// A credential in either accepted input form.
///
/// Deserializes untagged: a JSON object with `@context` becomes
/// [`VerifiableCredential::JsonLd`], a JSON string becomes
/// [`VerifiableCredential::Jwt`]. Exactly one variant is active per input;
/// shapes matching neither are rejected at deserialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerifiableCredential {
    /// JSON-LD object form with the status record inline.
    JsonLd(JsonLdCredential),
    /// Compact-token form (3 dot-delimited base64 segments).
    Jwt(String),
}

impl From<JsonLdCredential> for VerifiableCredential {
    fn from(credential: JsonLdCredential) -> Self {
        Self::JsonLd(credential)
    }
}

impl From<String> for VerifiableCredential {
    fn from(token: String) -> Self {
        Self::Jwt(token)
    }
}
