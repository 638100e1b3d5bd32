// src/services/identifier.rs
//! DID identifier derivation.
//!
//! `identifier = base58(RIPEMD160(SHA256(json(base_document with context))))`
//!
//! There is no randomness on this path: the same two public keys always
//! produce the same identifier.

use crate::error::Result;
use crate::models::did::{did_from_identifier, BaseDidDocument, CanonicalBytes};
use crate::utils::crypto::{base58_encode, sha256_ripemd160};
use log::debug;

/// Derives the base58 identifier from a base document.
///
/// The context marker is populated on a fresh copy; the argument is left untouched.
pub fn derive_identifier(base_document: &BaseDidDocument) -> Result<String> {
    let input = base_document.identifier_input().canonical_bytes()?;
    debug!("identifier input: {}", String::from_utf8_lossy(&input));

    Ok(base58_encode(&sha256_ripemd160(&input)))
}

/// Derives the full `did:bsn:` DID from a base document.
pub fn derive_did(base_document: &BaseDidDocument) -> Result<String> {
    let did = did_from_identifier(&derive_identifier(base_document)?);
    debug!("derived {}", did);
    Ok(did)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::key_management::KeyPair;
    use k256::SecretKey;

    fn pair_from_scalar(scalar: u8) -> KeyPair {
        let mut bytes = [0u8; 32];
        bytes[31] = scalar;
        KeyPair::from_secret_key(SecretKey::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_known_identifier() {
        let base = BaseDidDocument::from_public_keys(
            &pair_from_scalar(1).public_key,
            &pair_from_scalar(2).public_key,
        )
        .unwrap();

        assert_eq!(derive_identifier(&base).unwrap(), "B621Q7o3GQ47vvP8keWgKo8RSBn");
        assert_eq!(derive_did(&base).unwrap(), "did:bsn:B621Q7o3GQ47vvP8keWgKo8RSBn");
        assert!(base.context.is_none());
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let primary = KeyPair::generate();
        let alternate = KeyPair::generate();
        let base = BaseDidDocument::from_public_keys(&primary.public_key, &alternate.public_key).unwrap();
        let rebuilt = BaseDidDocument::from_public_keys(&primary.public_key, &alternate.public_key).unwrap();

        let first = derive_identifier(&base).unwrap();
        assert_eq!(first, derive_identifier(&base).unwrap());
        assert_eq!(first, derive_identifier(&rebuilt).unwrap());
        // 20 bytes never need more than 28 base58 characters
        assert!(!first.is_empty() && first.len() <= 28, "{}", first);
        assert_eq!(bs58::decode(&first).into_vec().unwrap().len(), 20);
    }

    #[test]
    fn test_key_roles_matter() {
        let primary = KeyPair::generate();
        let alternate = KeyPair::generate();
        let base = BaseDidDocument::from_public_keys(&primary.public_key, &alternate.public_key).unwrap();
        let swapped = BaseDidDocument::from_public_keys(&alternate.public_key, &primary.public_key).unwrap();

        assert_ne!(derive_identifier(&base).unwrap(), derive_identifier(&swapped).unwrap());
    }

    #[test]
    fn test_context_supplied_by_caller_is_overridden() {
        let base = BaseDidDocument::from_public_keys(
            &pair_from_scalar(1).public_key,
            &pair_from_scalar(2).public_key,
        )
        .unwrap();
        let mut stale = base.clone();
        stale.context = Some("urn:other".into());

        assert_eq!(derive_identifier(&stale).unwrap(), derive_identifier(&base).unwrap());
    }
}
