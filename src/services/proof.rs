// src/services/proof.rs
//! Proof signing.
//!
//! A proof is a recoverable secp256k1 ECDSA signature over the Keccak-256
//! digest of the document's canonical JSON, taken with the proof absent.

use crate::error::{DidError, Result};
use crate::models::did::{CanonicalBytes, DidDocument, Proof, PublicKeyRecord};
use crate::models::public_key::NamedCurve;
use crate::utils::crypto::hash_data;
use crate::wallet::key_management::{KeyPair, RECOVERABLE_SIGNATURE_LEN};
use log::debug;

/// Curve identifier carried in `proof.type`.
pub const PROOF_TYPE: NamedCurve = NamedCurve::Secp256k1;

/// Digest that a proof over `content` signs.
pub fn signing_digest<T: CanonicalBytes + ?Sized>(content: &T) -> Result<[u8; 32]> {
    Ok(hash_data(&content.canonical_bytes()?))
}

/// Signs any canonically encodable content.
pub fn sign_content<T: CanonicalBytes + ?Sized>(
    content: &T,
    key: &KeyPair,
) -> Result<[u8; RECOVERABLE_SIGNATURE_LEN]> {
    let digest = signing_digest(content)?;
    debug!("signing digest {}", ethers_core::utils::hex::encode(digest));
    key.sign_digest(&digest)
}

/// Creates a proof over `content` attributed to `did`.
pub fn new_proof<T: CanonicalBytes + ?Sized>(did: &str, key: &KeyPair, content: &T) -> Result<Proof> {
    let signature = sign_content(content, key)?;
    Ok(Proof {
        proof_type: PROOF_TYPE.name().to_string(),
        creator: did.to_string(),
        signature_value: base64::encode(signature),
    })
}

/// Signs `document` with its primary key and attaches the proof.
///
/// # Errors
/// - `WrongSigningKey` if `key` is not the document's authentication key
/// - `Serialization` / `Signing` if encoding or the signature primitive fail
pub fn attach_proof(mut document: DidDocument, key: &KeyPair) -> Result<DidDocument> {
    if PublicKeyRecord::from_public_key(&key.public_key)? != document.authentication {
        return Err(DidError::WrongSigningKey);
    }

    let proof = new_proof(&document.did, key, &document)?;
    document.proof = Some(proof);
    Ok(document)
}
