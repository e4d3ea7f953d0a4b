//! Hash utilities for vcstrack

use crate::core::types::Digest;
use sha2::{Digest as _, Sha256};

/// Compute the SHA-256 digest of data
pub fn sha256(data: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    Digest::from_bytes(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vectors() {
        assert_eq!(
            sha256(b"").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256(b"hello").to_hex(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_sha256_deterministic() {
        let data = b"Hello, vcstrack!";
        assert_eq!(sha256(data), sha256(data));
        assert_ne!(sha256(data), sha256(b"Hello, vcstrack?"));
    }

    #[test]
    fn test_binary_input() {
        let data = [0u8, 0xff, 0xfe, 0x00, 0x80];
        assert_eq!(
            sha256(&data).to_hex(),
            hex::encode(<Sha256 as sha2::Digest>::digest(data))
        );
    }
}
