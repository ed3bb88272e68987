//! # Account address newtype and publisher resolution
//!
//! [`AccountAddress`] is a domain-primitive newtype for the publisher's
//! chain account address, validated at construction time. Validation is
//! shape-only (`0x` + 40 hex characters): chain-specific checksum rules
//! are an external collaborator's concern, and the pipeline only needs a
//! well-formed address before it starts issuing network calls.
//!
//! [`resolve_publisher_account`] recovers the address from the status id
//! by scanning its colon-delimited segments for the first one matching the
//! address shape. Scanning is preferred over a fixed segment position —
//! it is robust to drift in the id format (`urn:eip155:...` vs
//! `eip155:...`).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::credential::CredentialStatus;

/// Number of hex characters in an account address, after the `0x` prefix.
pub const ADDRESS_HEX_LEN: usize = 40;

/// Errors from address validation and publisher resolution.
#[derive(Debug, Error)]
pub enum AddressError {
    /// No valid account address in the given value. For resolution
    /// failures the offending value is the full status id.
    #[error("invalid account address: {value}")]
    InvalidAddress {
        /// The string that failed validation.
        value: String,
    },
}

/// A validated chain account address (`0x` + 40 hex characters).
///
/// Always valid by construction; the inner string is kept exactly as
/// supplied (casing preserved).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Validate and wrap an address string.
    pub fn new(raw: impl Into<String>) -> Result<Self, AddressError> {
        let raw = raw.into();
        if is_hex_address(&raw) {
            Ok(Self(raw))
        } else {
            Err(AddressError::InvalidAddress { value: raw })
        }
    }

    /// Access the address as a string slice, including the `0x` prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Deserializes as a plain `String`, then routes through `new()` so that
// invalid values are rejected at deserialization time.
impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Check whether a string has the chain account address shape.
pub fn is_hex_address(value: &str) -> bool {
    match value.strip_prefix("0x") {
        Some(body) => {
            body.len() == ADDRESS_HEX_LEN && body.bytes().all(|b| b.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Resolve the publisher's account address from a status record.
///
/// Splits the status id on ':' and returns the first segment matching the
/// address shape. Fails with [`AddressError::InvalidAddress`] (carrying
/// the full id) when no segment validates. Runs entirely locally — this
/// is the last check before the pipeline goes to the network.
pub fn resolve_publisher_account(
    status: &CredentialStatus,
) -> Result<AccountAddress, AddressError> {
    status
        .id
        .split(':')
        .find(|segment| is_hex_address(segment))
        .map(|segment| AccountAddress(segment.to_string()))
        .ok_or_else(|| AddressError::InvalidAddress {
            value: status.id.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::{BFC_STATUS_ENTRY_TYPE, STATUS_PURPOSE_REVOCATION};

    const ADDRESS: &str = "0x32328bfaea51ce120db44f7755a1170e9cc43653";

    fn status_with_id(id: &str) -> CredentialStatus {
        CredentialStatus {
            id: id.to_string(),
            status_type: BFC_STATUS_ENTRY_TYPE.to_string(),
            status_purpose: STATUS_PURPOSE_REVOCATION.to_string(),
            status_publisher: format!("eip155:11155111:{ADDRESS}"),
        }
    }

    #[test]
    fn accepts_lowercase_and_mixed_case_addresses() {
        assert!(is_hex_address(ADDRESS));
        assert!(is_hex_address("0x32328BFAea51cE120Db44f7755A1170e9CC43653"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_hex_address("32328bfaea51ce120db44f7755a1170e9cc43653"));
        assert!(!is_hex_address("0x1234"));
        assert!(!is_hex_address("0xzz328bfaea51ce120db44f7755a1170e9cc43653"));
        assert!(!is_hex_address(""));
    }

    #[test]
    fn new_rejects_invalid_and_keeps_offending_value() {
        let err = AccountAddress::new("0x1234").expect_err("must fail");
        let AddressError::InvalidAddress { value } = err;
        assert_eq!(value, "0x1234");
    }

    #[test]
    fn resolves_address_from_canonical_position() {
        let status = status_with_id(&format!("urn:eip155:11155111:{ADDRESS}:aa6038"));
        let address = resolve_publisher_account(&status).expect("resolve");
        assert_eq!(address.as_str(), ADDRESS);
    }

    #[test]
    fn resolves_address_regardless_of_segment_position() {
        // Shorter id variant without the urn prefix.
        let status = status_with_id(&format!("eip155:11155111:{ADDRESS}"));
        let address = resolve_publisher_account(&status).expect("resolve");
        assert_eq!(address.as_str(), ADDRESS);
    }

    #[test]
    fn resolution_is_deterministic() {
        let status = status_with_id(&format!("urn:eip155:11155111:{ADDRESS}:aa6038"));
        let first = resolve_publisher_account(&status).expect("resolve");
        let second = resolve_publisher_account(&status).expect("resolve");
        assert_eq!(first, second);
    }

    #[test]
    fn id_without_address_segment_fails_with_invalid_address() {
        let status = status_with_id("urn:example:no-address-here:42");
        let err = resolve_publisher_account(&status).expect_err("must fail");
        let AddressError::InvalidAddress { value } = err;
        assert_eq!(value, "urn:example:no-address-here:42");
    }

    #[test]
    fn deserialize_validates_shape() {
        let ok: Result<AccountAddress, _> =
            serde_json::from_value(serde_json::json!(ADDRESS));
        assert!(ok.is_ok());

        let bad: Result<AccountAddress, _> =
            serde_json::from_value(serde_json::json!("0xnope"));
        assert!(bad.is_err());
    }
}
