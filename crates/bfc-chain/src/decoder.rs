//! # Field-element blob decoder
//!
//! The blob-commitment scheme stores payload bytes inside 32-byte field
//! elements, each reserving one byte as padding, so only 31 of every 32
//! bytes carry application data. In hex terms: of every 64-character
//! window, the first 62 characters are payload and the final 2 are the
//! padding slot.
//!
//! Decoding walks the concatenated blob hex in 64-character windows,
//! keeps the first 62 of each, concatenates, and prefixes `0x`. Pure,
//! deterministic, no I/O.
//!
//! Two conventions exist in the wild for input that is not a whole number
//! of windows: drop the trailing partial window ([`decode_blob_hex`], the
//! pipeline default) or reject it ([`decode_blob_hex_strict`]). Some
//! publishers additionally expect the decoded payload right-padded to the
//! nominal per-blob size; that is opt-in via
//! [`DecodeOptions::pad_to_nominal`] because it cannot be inferred from
//! the bytes alone.

use serde::{Deserialize, Serialize};

/// Hex characters per 32-byte field element.
pub const FIELD_ELEMENT_HEX_LEN: usize = 64;

/// Payload hex characters kept per field element (31 bytes).
pub const USABLE_HEX_PER_ELEMENT: usize = 62;

/// Raw size of one blob in bytes.
pub const BLOB_BYTES: usize = 128 * 1024;

/// Decoded payload hex length for one whole blob:
/// `(BLOB_BYTES / 32) * 62` = 253,952 characters (126,976 bytes).
pub const NOMINAL_DECODED_HEX_LEN: usize = (BLOB_BYTES / 32) * USABLE_HEX_PER_ELEMENT;

/// Errors from strict decoding and payload conversion.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// Input length is not a whole number of field-element windows.
    #[error(
        "blob hex length {len} is not a multiple of {FIELD_ELEMENT_HEX_LEN} \
         ({remainder} trailing characters)"
    )]
    Misaligned {
        /// Input hex length.
        len: usize,
        /// Characters beyond the last whole window.
        remainder: usize,
    },

    /// The payload is not valid hex.
    #[error("payload is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Decoding conventions, chosen per publisher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Reject misaligned input instead of dropping the trailing partial
    /// window.
    pub strict: bool,
    /// Right-pad the decoded payload with zero hex up to the next
    /// multiple of [`NOMINAL_DECODED_HEX_LEN`].
    pub pad_to_nominal: bool,
}

/// Decode concatenated blob hex, dropping any trailing partial window.
///
/// Accepts input with or without a leading `0x`; the result always
/// carries the `0x` prefix. Total: never fails.
pub fn decode_blob_hex(blob_hex: &str) -> String {
    depad(strip_input_prefix(blob_hex))
}

/// Decode concatenated blob hex, rejecting misaligned input.
pub fn decode_blob_hex_strict(blob_hex: &str) -> Result<String, DecodeError> {
    let body = strip_input_prefix(blob_hex);
    let remainder = body.len() % FIELD_ELEMENT_HEX_LEN;
    if remainder != 0 {
        return Err(DecodeError::Misaligned {
            len: body.len(),
            remainder,
        });
    }
    Ok(depad(body))
}

/// Decode with explicit conventions.
pub fn decode_with_options(
    blob_hex: &str,
    options: DecodeOptions,
) -> Result<String, DecodeError> {
    let mut payload = if options.strict {
        decode_blob_hex_strict(blob_hex)?
    } else {
        decode_blob_hex(blob_hex)
    };

    if options.pad_to_nominal {
        let body_len = payload.len() - 2;
        let target = body_len.div_ceil(NOMINAL_DECODED_HEX_LEN) * NOMINAL_DECODED_HEX_LEN;
        payload.reserve(target - body_len);
        for _ in body_len..target {
            payload.push('0');
        }
    }

    Ok(payload)
}

/// Convert a `0x`-prefixed payload back to bytes.
pub fn decoded_payload_bytes(payload_hex: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(hex::decode(strip_input_prefix(payload_hex))?)
}

/// Convert a `0x`-prefixed payload to text, for publishers that blob-encode
/// UTF-8. Invalid sequences are replaced, matching lossy text decoding.
pub fn payload_to_string(payload_hex: &str) -> Result<String, DecodeError> {
    let bytes = decoded_payload_bytes(payload_hex)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn strip_input_prefix(hex_str: &str) -> &str {
    hex_str.strip_prefix("0x").unwrap_or(hex_str)
}

fn depad(body: &str) -> String {
    let aligned_len = body.len() - body.len() % FIELD_ELEMENT_HEX_LEN;
    let bytes = &body.as_bytes()[..aligned_len];

    let mut kept =
        Vec::with_capacity(aligned_len / FIELD_ELEMENT_HEX_LEN * USABLE_HEX_PER_ELEMENT);
    for window in bytes.chunks_exact(FIELD_ELEMENT_HEX_LEN) {
        kept.extend_from_slice(&window[..USABLE_HEX_PER_ELEMENT]);
    }

    format!("0x{}", String::from_utf8_lossy(&kept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Encode 31-byte payload chunks the way a publisher does: each chunk
    /// becomes one 32-byte field element with a zero padding byte at the
    /// end.
    fn encode_chunks(chunks: &[Vec<u8>]) -> String {
        let mut out = String::with_capacity(chunks.len() * FIELD_ELEMENT_HEX_LEN);
        for chunk in chunks {
            assert_eq!(chunk.len(), 31);
            out.push_str(&hex::encode(chunk));
            out.push_str("00");
        }
        out
    }

    fn deterministic_chunks(n: usize) -> Vec<Vec<u8>> {
        (0..n)
            .map(|i| (0..31u8).map(|j| (i as u8).wrapping_mul(31).wrapping_add(j)).collect())
            .collect()
    }

    #[test]
    fn round_trip_reproduces_chunks_bit_for_bit() {
        for n in [1usize, 31, 1000] {
            let chunks = deterministic_chunks(n);
            let blob_hex = encode_chunks(&chunks);
            let payload = decode_blob_hex(&blob_hex);
            let bytes = decoded_payload_bytes(&payload).expect("hex");
            let original: Vec<u8> = chunks.concat();
            assert_eq!(bytes, original, "round trip failed for {n} chunks");
        }
    }

    #[test]
    fn output_length_is_whole_windows_times_62() {
        // 128 hex chars = 2 whole windows, so exactly 2 * 62 survive.
        let blob_hex = "ab".repeat(FIELD_ELEMENT_HEX_LEN);
        let payload = decode_blob_hex(&blob_hex);
        assert_eq!(payload.len(), 2 + 2 * USABLE_HEX_PER_ELEMENT);
    }

    #[test]
    fn decoding_is_deterministic() {
        let blob_hex = encode_chunks(&deterministic_chunks(8));
        assert_eq!(decode_blob_hex(&blob_hex), decode_blob_hex(&blob_hex));
    }

    #[test]
    fn full_zero_blob_decodes_to_zero_payload() {
        let blob_hex = "0".repeat(BLOB_BYTES * 2);
        let payload = decode_blob_hex(&blob_hex);
        assert_eq!(payload.len(), 2 + NOMINAL_DECODED_HEX_LEN);

        let bytes = decoded_payload_bytes(&payload).expect("hex");
        assert_eq!(bytes.len(), (BLOB_BYTES / 32) * 31);
        assert_eq!(bytes.len(), 126_976);
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn input_prefix_is_accepted() {
        let body = encode_chunks(&deterministic_chunks(2));
        assert_eq!(decode_blob_hex(&body), decode_blob_hex(&format!("0x{body}")));
    }

    #[test]
    fn lenient_decode_drops_trailing_partial_window() {
        let mut blob_hex = encode_chunks(&deterministic_chunks(3));
        blob_hex.push_str("abcd"); // partial window
        let payload = decode_blob_hex(&blob_hex);
        assert_eq!(payload.len(), 2 + 3 * USABLE_HEX_PER_ELEMENT);
    }

    #[test]
    fn strict_decode_rejects_misaligned_input() {
        let mut blob_hex = encode_chunks(&deterministic_chunks(3));
        blob_hex.push_str("abcd");
        let err = decode_blob_hex_strict(&blob_hex).expect_err("must fail");
        assert_eq!(
            err,
            DecodeError::Misaligned {
                len: 3 * FIELD_ELEMENT_HEX_LEN + 4,
                remainder: 4,
            }
        );
    }

    #[test]
    fn strict_decode_accepts_aligned_input() {
        let blob_hex = encode_chunks(&deterministic_chunks(3));
        let strict = decode_blob_hex_strict(&blob_hex).expect("aligned");
        assert_eq!(strict, decode_blob_hex(&blob_hex));
    }

    #[test]
    fn empty_input_decodes_to_bare_prefix() {
        assert_eq!(decode_blob_hex(""), "0x");
        assert_eq!(decode_blob_hex_strict("").expect("aligned"), "0x");
    }

    #[test]
    fn pad_to_nominal_right_pads_with_zero_hex() {
        let blob_hex = encode_chunks(&deterministic_chunks(2));
        let options = DecodeOptions {
            strict: false,
            pad_to_nominal: true,
        };
        let payload = decode_with_options(&blob_hex, options).expect("decode");
        assert_eq!(payload.len(), 2 + NOMINAL_DECODED_HEX_LEN);
        assert!(payload.ends_with("00"));

        // The unpadded payload is a prefix of the padded one.
        let unpadded = decode_blob_hex(&blob_hex);
        assert!(payload.starts_with(&unpadded));
    }

    #[test]
    fn pad_to_nominal_leaves_whole_blob_untouched() {
        let blob_hex = "0".repeat(BLOB_BYTES * 2);
        let options = DecodeOptions {
            strict: true,
            pad_to_nominal: true,
        };
        let payload = decode_with_options(&blob_hex, options).expect("decode");
        assert_eq!(payload.len(), 2 + NOMINAL_DECODED_HEX_LEN);
    }

    #[test]
    fn payload_to_string_round_trips_utf8() {
        let text = "revocation set v42";
        let mut chunk = text.as_bytes().to_vec();
        chunk.resize(31, 0);
        let blob_hex = encode_chunks(&[chunk]);
        let payload = decode_blob_hex(&blob_hex);
        let decoded = payload_to_string(&payload).expect("utf8");
        assert!(decoded.starts_with(text));
    }

    #[test]
    fn payload_bytes_rejects_non_hex() {
        let err = decoded_payload_bytes("0xzz").expect_err("must fail");
        assert!(matches!(err, DecodeError::InvalidHex(_)));
    }

    proptest! {
        #[test]
        fn round_trip_holds_for_arbitrary_chunks(
            chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 31), 1..64)
        ) {
            let blob_hex = encode_chunks(&chunks);
            let payload = decode_blob_hex(&blob_hex);
            let bytes = decoded_payload_bytes(&payload).expect("hex");
            prop_assert_eq!(bytes, chunks.concat());
        }

        #[test]
        fn decoded_length_is_floor_windows_times_62(input_len in 0usize..4096) {
            let blob_hex = "a".repeat(input_len);
            let payload = decode_blob_hex(&blob_hex);
            let windows = input_len / FIELD_ELEMENT_HEX_LEN;
            prop_assert_eq!(payload.len(), 2 + windows * USABLE_HEX_PER_ELEMENT);
        }
    }
}
