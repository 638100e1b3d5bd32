// src/services/verifier.rs
//! Proof verification for DID documents.
//!
//! Recomputes the Keccak-256 digest over the document with its proof
//! removed, recovers the signer from the recoverable signature and compares
//! it with the declared public key.

use crate::error::{DidError, Result};
use crate::models::did::{DidDocument, PublicKeyRecord};
use crate::models::public_key::{decode_public_key, NamedCurve};
use crate::services::proof::{signing_digest, PROOF_TYPE};
use crate::wallet::key_management::RECOVERABLE_SIGNATURE_LEN;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::Secp256k1;

/// Verifies the document's proof against its `authentication` key.
pub fn verify_proof(document: &DidDocument) -> Result<()> {
    verify_proof_with_key(document, &document.authentication)
}

/// Verifies the document's proof against an arbitrary key record.
///
/// # Errors
/// - `InvalidProof` if the proof is missing, malformed, attributed to
///   another DID, or was not produced by `key`
/// - `UnsupportedCurve` / `InvalidPublicKey` if `key` cannot be decoded
pub fn verify_proof_with_key(document: &DidDocument, key: &PublicKeyRecord) -> Result<()> {
    let proof = document
        .proof
        .as_ref()
        .ok_or_else(|| DidError::InvalidProof("document has no proof".into()))?;

    if proof.proof_type != PROOF_TYPE.name() {
        return Err(DidError::InvalidProof(format!("unsupported proof type {}", proof.proof_type)));
    }
    if proof.creator != document.did {
        return Err(DidError::InvalidProof(format!(
            "creator {} does not match {}",
            proof.creator, document.did
        )));
    }

    let curve = key.curve()?;
    if curve != NamedCurve::Secp256k1 {
        return Err(DidError::UnsupportedCurve(curve.name().to_string()));
    }
    let expected = VerifyingKey::from(&decode_public_key::<Secp256k1>(&key.public_key)?);

    let (signature, recovery_id) = parse_signature(&proof.signature_value)?;
    let digest = signing_digest(document)?;
    let recovered = VerifyingKey::recover_from_prehash(&digest, &signature, recovery_id)
        .map_err(|_| DidError::InvalidProof("signature does not verify".into()))?;

    if recovered != expected {
        return Err(DidError::InvalidProof("signature was not produced by the declared key".into()));
    }
    Ok(())
}

fn parse_signature(signature_value: &str) -> Result<(Signature, RecoveryId)> {
    let bytes = base64::decode(signature_value)
        .map_err(|e| DidError::InvalidProof(format!("signature is not base64: {}", e)))?;
    if bytes.len() != RECOVERABLE_SIGNATURE_LEN {
        return Err(DidError::InvalidProof(format!(
            "signature is {} bytes, expected {}",
            bytes.len(),
            RECOVERABLE_SIGNATURE_LEN
        )));
    }

    let signature = Signature::from_slice(&bytes[..64])
        .map_err(|_| DidError::InvalidProof("malformed r || s".into()))?;
    // Accept Ethereum-style 27/28 as well as raw 0/1
    let v = match bytes[64] {
        v @ 27..=28 => v - 27,
        v => v,
    };
    let recovery_id =
        RecoveryId::from_byte(v).ok_or_else(|| DidError::InvalidProof(format!("bad recovery id {}", bytes[64])))?;

    Ok((signature, recovery_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::did::Proof;
    use crate::services::document_builder::create_did_document;

    #[test]
    fn test_verify_against_authentication() {
        let (document, _) = create_did_document().unwrap();
        verify_proof(&document).unwrap();
        verify_proof_with_key(&document, &document.authentication).unwrap();
    }

    #[test]
    fn test_verify_against_recovery_fails() {
        let (document, _) = create_did_document().unwrap();
        assert!(matches!(
            verify_proof_with_key(&document, &document.recovery),
            Err(DidError::InvalidProof(_))
        ));
    }

    #[test]
    fn test_tampered_fields_fail() {
        let (document, _) = create_did_document().unwrap();

        let mut updated = document.clone();
        updated.updated = "2099-01-01 00:00:00".into();
        assert!(matches!(verify_proof(&updated), Err(DidError::InvalidProof(_))));

        let mut version = document.clone();
        version.version = "2".into();
        assert!(matches!(verify_proof(&version), Err(DidError::InvalidProof(_))));

        // Swapping the keys changes both the signed bytes and the expected signer
        let mut swapped = document.clone();
        std::mem::swap(&mut swapped.authentication, &mut swapped.recovery);
        assert!(matches!(verify_proof(&swapped), Err(DidError::InvalidProof(_))));
    }

    #[test]
    fn test_forged_creator_fails() {
        let (mut document, _) = create_did_document().unwrap();
        if let Some(proof) = document.proof.as_mut() {
            proof.creator = "did:bsn:someoneElse".into();
        }
        assert!(matches!(verify_proof(&document), Err(DidError::InvalidProof(_))));
    }

    #[test]
    fn test_missing_or_malformed_proof() {
        let (document, _) = create_did_document().unwrap();

        assert!(matches!(
            verify_proof(&document.without_proof()),
            Err(DidError::InvalidProof(_))
        ));

        let mut short = document.clone();
        short.proof = Some(Proof {
            proof_type: "Secp256k1".into(),
            creator: document.did.clone(),
            signature_value: base64::encode([1u8; 64]),
        });
        assert!(matches!(verify_proof(&short), Err(DidError::InvalidProof(_))));

        let mut garbage = document.clone();
        if let Some(proof) = garbage.proof.as_mut() {
            proof.signature_value = "not base64!".into();
        }
        assert!(matches!(verify_proof(&garbage), Err(DidError::InvalidProof(_))));
    }

    #[test]
    fn test_ethereum_style_recovery_id() {
        let (mut document, _) = create_did_document().unwrap();
        if let Some(proof) = document.proof.as_mut() {
            let mut bytes = base64::decode(&proof.signature_value).unwrap();
            bytes[64] += 27;
            proof.signature_value = base64::encode(bytes);
        }
        verify_proof(&document).unwrap();
    }

    #[test]
    fn test_survives_json_roundtrip() {
        let (document, _) = create_did_document().unwrap();
        let json = serde_json::to_string_pretty(&document).unwrap();
        let parsed: DidDocument = serde_json::from_str(&json).unwrap();
        verify_proof(&parsed).unwrap();
    }
}
