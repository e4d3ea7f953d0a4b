//! Binary-safe text codec for persisted content
//!
//! File contents go into a JSON record, and JSON strings must be valid UTF-8.
//! Every content blob is therefore stored as standard Base64 (RFC 4648
//! alphabet, `=` padded) and decoded on load.
//!
//! Two decoders are provided:
//!
//! - [`decode`] is lenient. It reads alphabet characters up to the first one
//!   outside the alphabet (padding included) and decodes that prefix. It
//!   never fails, so a record written by a newer format with trailing data
//!   still loads.
//! - [`decode_strict`] rejects anything that is not canonical Base64.

use crate::core::error::{Result, VcsError};
use base64::alphabet;
use base64::engine::general_purpose::{self, GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

/// Decoder used for the lenient path: the input has already been cut at the
/// first non-alphabet character, so padding is absent and the final sextet
/// may carry spare bits.
const PREFIX_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encode arbitrary bytes into padded standard Base64
pub fn encode(data: &[u8]) -> String {
    general_purpose::STANDARD.encode(data)
}

/// Decode Base64 text, stopping at the first character outside the alphabet
pub fn decode(text: &str) -> Vec<u8> {
    let valid = alphabet_prefix(text);

    // A single leftover character holds only six bits and yields no byte
    let usable = if valid.len() % 4 == 1 {
        &valid[..valid.len() - 1]
    } else {
        valid
    };

    // `usable` contains only alphabet characters and has a legal length
    PREFIX_ENGINE.decode(usable).unwrap_or_default()
}

/// Decode Base64 text, failing on any malformed input
pub fn decode_strict(text: &str) -> Result<Vec<u8>> {
    general_purpose::STANDARD
        .decode(text)
        .map_err(|e| VcsError::codec(e.to_string()))
}

/// Longest leading run of standard-alphabet characters
fn alphabet_prefix(text: &str) -> &str {
    let end = text
        .bytes()
        .position(|b| !is_alphabet_byte(b))
        .unwrap_or(text.len());
    &text[..end]
}

fn is_alphabet_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'+' || b == b'/'
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "Zg==");
        assert_eq!(encode(b"fo"), "Zm8=");
        assert_eq!(encode(b"foo"), "Zm9v");
        assert_eq!(encode(b"hello"), "aGVsbG8=");
    }

    #[test]
    fn test_decode_padded() {
        assert_eq!(decode("Zg=="), b"f");
        assert_eq!(decode("Zm8="), b"fo");
        assert_eq!(decode("aGVsbG8="), b"hello");
        assert_eq!(decode(""), b"");
    }

    #[test]
    fn test_binary_roundtrip() {
        let data = vec![0x00, 0xff, 0xc3, 0x28, 0x00, 0xa0, 0xa1, 0x80];
        let encoded = encode(&data);
        assert!(encoded.is_ascii());
        assert_eq!(decode(&encoded), data);
        assert_eq!(decode_strict(&encoded).unwrap(), data);
    }

    #[test]
    fn test_decode_stops_at_invalid_character() {
        // "aGVs" is "hel"; everything from '!' on is ignored
        assert_eq!(decode("aGVs!bG8="), b"hel");
        assert_eq!(decode("!aGVs"), b"");
        assert_eq!(decode("aGVsbG8=garbage"), b"hello");
    }

    #[test]
    fn test_decode_drops_dangling_sextet() {
        assert_eq!(decode("aGVsb"), b"hel");
        assert_eq!(decode("Z"), b"");
    }

    #[test]
    fn test_decode_unpadded() {
        assert_eq!(decode("Zm8"), b"fo");
        assert_eq!(decode("Zg"), b"f");
    }

    #[test]
    fn test_decode_strict_rejects_invalid() {
        assert!(decode_strict("aGVs!bG8=").is_err());
        assert!(decode_strict("Z").is_err());
        assert!(decode_strict("Zm8").is_err());
        assert!(matches!(
            decode_strict("@@@@"),
            Err(VcsError::Codec { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let encoded = encode(&data);
            prop_assert_eq!(encoded.len() % 4, 0);
            prop_assert_eq!(&decode(&encoded), &data);
            prop_assert_eq!(&decode_strict(&encoded).unwrap(), &data);
        }

        #[test]
        fn prop_lenient_decode_never_panics(text in "\\PC{0,64}") {
            let _ = decode(&text);
        }

        #[test]
        fn prop_trailing_junk_is_ignored(
            data in proptest::collection::vec(any::<u8>(), 0..256),
            junk in "[!#$%&*.:;?@ ~-]{1}[ -~]{0,16}",
        ) {
            let text = format!("{}{}", encode(&data), junk);
            prop_assert_eq!(decode(&text), data);
        }
    }
}
