//! # Credential status extraction
//!
//! Normalizes either credential form into a [`CredentialStatus`] record.
//! For the JSON-LD form this is a direct field access; for the compact
//! token the middle segment is base64-decoded and parsed as JSON.
//!
//! Pure and total over its error set: no side effects, each failure mode
//! is a distinct [`ExtractionError`] kind.

use base64::Engine as _;
use thiserror::Error;

use crate::credential::{CredentialStatus, VerifiableCredential};

/// Number of dot-delimited segments in a compact token.
const COMPACT_TOKEN_SEGMENTS: usize = 3;

/// Errors from credential status extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The compact token does not have exactly 3 dot-delimited segments.
    #[error("invalid compact token: expected {COMPACT_TOKEN_SEGMENTS} segments, found {segments}")]
    InvalidFormat {
        /// Number of segments actually found.
        segments: usize,
    },

    /// The token payload could not be base64-decoded or is not JSON.
    #[error("invalid compact token payload: {reason}")]
    InvalidPayload {
        /// Description of the decode failure.
        reason: String,
    },

    /// Neither form carried a `credentialStatus` member.
    #[error("credential status not found")]
    StatusNotFound,
}

/// Extract the status record from a credential in either form.
///
/// JSON-LD credentials are read directly; compact tokens are split on
/// '.', their payload segment base64-decoded and parsed. The record is
/// returned exactly as embedded — no normalization beyond form selection.
pub fn extract_credential_status(
    credential: &VerifiableCredential,
) -> Result<CredentialStatus, ExtractionError> {
    match credential {
        VerifiableCredential::JsonLd(cred) => cred
            .credential_status
            .clone()
            .ok_or(ExtractionError::StatusNotFound),
        VerifiableCredential::Jwt(token) => extract_from_compact_token(token),
    }
}

fn extract_from_compact_token(token: &str) -> Result<CredentialStatus, ExtractionError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != COMPACT_TOKEN_SEGMENTS {
        return Err(ExtractionError::InvalidFormat {
            segments: segments.len(),
        });
    }

    let payload = decode_token_segment(segments[1])?;
    let body: serde_json::Value = serde_json::from_slice(&payload).map_err(|e| {
        ExtractionError::InvalidPayload {
            reason: format!("payload is not JSON: {e}"),
        }
    })?;

    let status = body
        .get("credentialStatus")
        .cloned()
        .ok_or(ExtractionError::StatusNotFound)?;

    serde_json::from_value(status).map_err(|e| ExtractionError::InvalidPayload {
        reason: format!("malformed credentialStatus: {e}"),
    })
}

/// Decode one token segment. Tokens in the wild use the base64url alphabet,
/// but some issuers emit the standard alphabet; padding is stripped before
/// decoding so both padded and unpadded segments are accepted.
fn decode_token_segment(segment: &str) -> Result<Vec<u8>, ExtractionError> {
    use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};

    let trimmed = segment.trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .map_err(|e| ExtractionError::InvalidPayload {
            reason: format!("base64 decode failed: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::{
        JsonLdCredential, BFC_STATUS_ENTRY_TYPE, STATUS_PURPOSE_REVOCATION,
    };
    use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

    fn sample_status() -> CredentialStatus {
        CredentialStatus {
            id: "urn:eip155:11155111:0x32328bfaea51ce120db44f7755a1170e9cc43653:aa6038"
                .to_string(),
            status_type: BFC_STATUS_ENTRY_TYPE.to_string(),
            status_purpose: STATUS_PURPOSE_REVOCATION.to_string(),
            status_publisher: "eip155:11155111:0x32328bfaea51ce120db44f7755a1170e9cc43653"
                .to_string(),
        }
    }

    fn token_with_payload(payload: &serde_json::Value) -> String {
        let encoded = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("eyJhbGciOiJFUzI1NiJ9.{encoded}.c2ln")
    }

    #[test]
    fn json_ld_with_inline_status_returns_record_unchanged() {
        let vc = VerifiableCredential::JsonLd(JsonLdCredential {
            context: Default::default(),
            credential_status: Some(sample_status()),
            rest: Default::default(),
        });
        let status = extract_credential_status(&vc).expect("extract");
        assert_eq!(status, sample_status());
    }

    #[test]
    fn json_ld_without_status_fails_with_status_not_found() {
        let vc = VerifiableCredential::JsonLd(JsonLdCredential {
            context: Default::default(),
            credential_status: None,
            rest: Default::default(),
        });
        let err = extract_credential_status(&vc).expect_err("must fail");
        assert!(matches!(err, ExtractionError::StatusNotFound));
    }

    #[test]
    fn token_with_status_in_payload_extracts() {
        let payload = serde_json::json!({
            "iss": "did:example:issuer",
            "credentialStatus": sample_status(),
        });
        let vc = VerifiableCredential::Jwt(token_with_payload(&payload));
        let status = extract_credential_status(&vc).expect("extract");
        assert_eq!(status, sample_status());
    }

    #[test]
    fn token_with_two_segments_fails_with_invalid_format() {
        let vc = VerifiableCredential::Jwt("aaa.bbb".to_string());
        let err = extract_credential_status(&vc).expect_err("must fail");
        assert!(matches!(err, ExtractionError::InvalidFormat { segments: 2 }));
    }

    #[test]
    fn token_with_four_segments_fails_with_invalid_format() {
        let vc = VerifiableCredential::Jwt("a.b.c.d".to_string());
        let err = extract_credential_status(&vc).expect_err("must fail");
        assert!(matches!(err, ExtractionError::InvalidFormat { segments: 4 }));
    }

    #[test]
    fn token_with_undecodable_payload_fails_with_invalid_payload() {
        let vc = VerifiableCredential::Jwt("aaa.!!!not-base64!!!.ccc".to_string());
        let err = extract_credential_status(&vc).expect_err("must fail");
        assert!(matches!(err, ExtractionError::InvalidPayload { .. }));
    }

    #[test]
    fn token_with_non_json_payload_fails_with_invalid_payload() {
        let encoded = URL_SAFE_NO_PAD.encode("definitely not json");
        let vc = VerifiableCredential::Jwt(format!("aaa.{encoded}.ccc"));
        let err = extract_credential_status(&vc).expect_err("must fail");
        assert!(matches!(err, ExtractionError::InvalidPayload { .. }));
    }

    #[test]
    fn token_without_status_field_fails_with_status_not_found() {
        let payload = serde_json::json!({"iss": "did:example:issuer"});
        let vc = VerifiableCredential::Jwt(token_with_payload(&payload));
        let err = extract_credential_status(&vc).expect_err("must fail");
        assert!(matches!(err, ExtractionError::StatusNotFound));
    }

    #[test]
    fn standard_alphabet_padded_payload_is_accepted() {
        let payload = serde_json::json!({"credentialStatus": sample_status()});
        let encoded = STANDARD.encode(payload.to_string());
        let vc = VerifiableCredential::Jwt(format!("aaa.{encoded}.ccc"));
        let status = extract_credential_status(&vc).expect("extract");
        assert_eq!(status, sample_status());
    }
}
