// src/utils/crypto.rs
//! Hash and encoding primitives used by identifier derivation and proof signing.
//!
//! Proof digests use Keccak-256 (Ethereum's standard hash function), matching
//! the signing convention of the registry's secp256k1 verifier. Identifiers
//! use Bitcoin-style `RIPEMD160(SHA256(..))` rendered in base58.

use ethers_core::utils::keccak256;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Computes a Keccak-256 hash of the input data (Ethereum-compatible).
///
/// # Arguments
/// * `data` - Binary data to hash (as bytes slice)
///
/// # Returns
/// Fixed-size 32-byte array (`[u8; 32]`) containing the hash.
///
/// The raw bytes are hashed as-is: no length prefix and no
/// `"\x19Ethereum Signed Message"` envelope.
pub fn hash_data(data: &[u8]) -> [u8; 32] {
    keccak256(data)
}

/// Computes `RIPEMD160(SHA256(data))`.
pub fn sha256_ripemd160(data: &[u8]) -> [u8; 20] {
    let sha256_hash = Sha256::digest(data);

    let mut ripemd160 = Ripemd160::new();
    ripemd160.update(sha256_hash);
    let ripemd160_hash = ripemd160.finalize();

    let mut result = [0u8; 20];
    result.copy_from_slice(&ripemd160_hash[..]);
    result
}

/// Base58 (Bitcoin alphabet) without version byte or checksum.
pub fn base58_encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_known_vector() {
        // keccak256("") from the Ethereum yellow paper
        let hash = hash_data(b"");
        assert_eq!(
            ethers_core::utils::hex::encode(hash),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_sha256_ripemd160_known_vector() {
        let expected = [
            0x8d, 0x15, 0x9f, 0x1c, 0x4f, 0x99, 0xd8, 0xed, 0x85, 0x8f, 0x78, 0x32, 0x31, 0x0d,
            0xb3, 0x1c, 0xb9, 0x1e, 0x07, 0x45,
        ];
        assert_eq!(sha256_ripemd160(b"Hello, world!"), expected);
    }

    #[test]
    fn test_base58_has_no_checksum() {
        assert_eq!(base58_encode(b"hello world"), "StV1DL6CwTryKyV");
        // Leading zero bytes map to leading '1's
        assert_eq!(base58_encode(&[0, 0, 1]), "112");
    }
}
