// src/models/did.rs
//! DID document data model for the `did:bsn` method.
//!
//! Field declaration order in these structs is load-bearing: the compact
//! JSON encoding of [`BaseDidDocument`] is hashed into the DID identifier and
//! the encoding of [`DidDocument`] (without its proof) is what the proof signs.

use crate::error::Result;
use crate::models::public_key::{canonicalize, NamedCurve};
use crate::utils::serialization::canonical_json;
use k256::elliptic_curve::{
    pkcs8::AssociatedOid,
    sec1::{FromEncodedPoint, ModulusSize, ToEncodedPoint},
    AffinePoint, CurveArithmetic, FieldBytesSize, PublicKey,
};
use serde::{Deserialize, Serialize};

/// Context marker emitted only into the identifier hash input.
pub const W3C_FORMAT_ADDRESS: &str = "https://w3id.org/did/v1";
pub const DID_PREFIX: &str = "did";
pub const DID_PROJECT_NAME: &str = "bsn";
pub const DID_SEPARATOR: &str = ":";
pub const DOCUMENT_VERSION: &str = "1";

/// Builds a DID string from its method-specific identifier.
///
/// # DID Format
/// ```text
/// did:bsn:<base58-identifier>
/// ```
pub fn did_from_identifier(identifier: &str) -> String {
    format!("{DID_PREFIX}{DID_SEPARATOR}{DID_PROJECT_NAME}{DID_SEPARATOR}{identifier}")
}

/// Returns the method-specific identifier of a `did:bsn` DID.
pub fn identifier_from_did(did: &str) -> Option<&str> {
    did.strip_prefix(DID_PREFIX)?
        .strip_prefix(DID_SEPARATOR)?
        .strip_prefix(DID_PROJECT_NAME)?
        .strip_prefix(DID_SEPARATOR)
        .filter(|identifier| !identifier.is_empty())
}

/// Serializable form of a public key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyRecord {
    /// Curve identifier, e.g. `"Secp256k1"`
    #[serde(rename = "type")]
    pub key_type: String,

    /// Decimal rendering of the uncompressed point bytes
    #[serde(rename = "publicKey")]
    pub public_key: String,
}

impl PublicKeyRecord {
    pub fn from_public_key<C>(public_key: &PublicKey<C>) -> Result<Self>
    where
        C: CurveArithmetic + AssociatedOid,
        AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
        FieldBytesSize<C>: ModulusSize,
    {
        let canonical = canonicalize(public_key)?;
        Ok(Self {
            key_type: canonical.curve().name().to_string(),
            public_key: canonical.decimal().to_string(),
        })
    }

    /// Resolves the record's `type` against the curve registry.
    pub fn curve(&self) -> Result<NamedCurve> {
        self.key_type.parse()
    }
}

/// The pre-identifier document: the two public keys a DID is derived from.
///
/// Private key material is never part of this struct.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BaseDidDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub recovery: PublicKeyRecord,
    pub authentication: PublicKeyRecord,
}

impl BaseDidDocument {
    /// Persisted form, without the context marker.
    pub fn new(authentication: PublicKeyRecord, recovery: PublicKeyRecord) -> Self {
        Self {
            context: None,
            recovery,
            authentication,
        }
    }

    /// Builds the base document from the primary and alternate public keys.
    pub fn from_public_keys<C>(primary: &PublicKey<C>, alternate: &PublicKey<C>) -> Result<Self>
    where
        C: CurveArithmetic + AssociatedOid,
        AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
        FieldBytesSize<C>: ModulusSize,
    {
        Ok(Self::new(
            PublicKeyRecord::from_public_key(primary)?,
            PublicKeyRecord::from_public_key(alternate)?,
        ))
    }

    /// Hash-input form, with the context marker populated.
    pub fn identifier_input(&self) -> Self {
        Self {
            context: Some(W3C_FORMAT_ADDRESS.to_string()),
            ..self.clone()
        }
    }
}

/// The DID document persisted by the registry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DidDocument {
    /// Creation time, `YYYY-MM-DD HH:MM:SS` in UTC
    pub created: String,
    pub recovery: PublicKeyRecord,
    pub updated: String,
    pub version: String,
    pub did: String,
    pub authentication: PublicKeyRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

impl DidDocument {
    /// The document as it was before its proof was attached.
    pub fn without_proof(&self) -> Self {
        Self {
            proof: None,
            ..self.clone()
        }
    }
}

/// Detached signature binding a [`DidDocument`] to its authentication key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    #[serde(rename = "type")]
    pub proof_type: String,

    /// DID of the signer
    pub creator: String,

    /// Base64 of the 65-byte `r || s || v` signature
    #[serde(rename = "signatureValue")]
    pub signature_value: String,
}

/// Values with a canonical byte encoding that can be hashed and signed.
pub trait CanonicalBytes {
    fn canonical_bytes(&self) -> Result<Vec<u8>>;
}

impl CanonicalBytes for BaseDidDocument {
    fn canonical_bytes(&self) -> Result<Vec<u8>> {
        canonical_json(self)
    }
}

impl CanonicalBytes for DidDocument {
    /// Always encodes the document with the proof absent.
    fn canonical_bytes(&self) -> Result<Vec<u8>> {
        match self.proof {
            None => canonical_json(self),
            Some(_) => canonical_json(&self.without_proof()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: &str) -> PublicKeyRecord {
        PublicKeyRecord {
            key_type: "Secp256k1".to_string(),
            public_key: value.to_string(),
        }
    }

    fn sample_document() -> DidDocument {
        DidDocument {
            created: "2022-02-16 11:00:33".into(),
            recovery: record("2"),
            updated: "2022-02-16 11:00:33".into(),
            version: DOCUMENT_VERSION.into(),
            did: did_from_identifier("27V2H3Xn42Dh6nZMJcSFDZPnik1m"),
            authentication: record("1"),
            proof: None,
        }
    }

    #[test]
    fn test_did_from_identifier() {
        assert_eq!(did_from_identifier("X"), "did:bsn:X");
        assert_eq!(
            did_from_identifier("3wxYHXwAm57grc9JUr2zrPHt9HC"),
            "did:bsn:3wxYHXwAm57grc9JUr2zrPHt9HC"
        );
    }

    #[test]
    fn test_identifier_from_did() {
        assert_eq!(identifier_from_did("did:bsn:abc"), Some("abc"));
        assert_eq!(identifier_from_did("did:bsn:"), None);
        assert_eq!(identifier_from_did("did:web:abc"), None);
    }

    #[test]
    fn test_base_document_encoding() {
        let base = BaseDidDocument::new(record("1"), record("2"));
        let persisted = String::from_utf8(base.canonical_bytes().unwrap()).unwrap();
        assert_eq!(
            persisted,
            r#"{"recovery":{"type":"Secp256k1","publicKey":"2"},"authentication":{"type":"Secp256k1","publicKey":"1"}}"#
        );

        let input = base.identifier_input();
        assert!(base.context.is_none());
        let hashed = String::from_utf8(input.canonical_bytes().unwrap()).unwrap();
        assert!(hashed.starts_with(r#"{"context":"https://w3id.org/did/v1","recovery":"#));
    }

    #[test]
    fn test_document_field_order() {
        let json = String::from_utf8(sample_document().canonical_bytes().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"created":"2022-02-16 11:00:33","recovery":{"type":"Secp256k1","publicKey":"2"},"updated":"2022-02-16 11:00:33","version":"1","did":"did:bsn:27V2H3Xn42Dh6nZMJcSFDZPnik1m","authentication":{"type":"Secp256k1","publicKey":"1"}}"#
        );
    }

    #[test]
    fn test_canonical_bytes_ignore_proof() {
        let unsigned = sample_document();
        let mut signed = unsigned.clone();
        signed.proof = Some(Proof {
            proof_type: "Secp256k1".into(),
            creator: signed.did.clone(),
            signature_value: "AA==".into(),
        });

        assert_eq!(unsigned.canonical_bytes().unwrap(), signed.canonical_bytes().unwrap());

        let full = serde_json::to_value(&signed).unwrap();
        assert_eq!(full["proof"]["signatureValue"], "AA==");
        assert_eq!(full["proof"]["creator"], signed.did);
    }

    #[test]
    fn test_record_curve_lookup() {
        assert_eq!(record("1").curve().unwrap(), NamedCurve::Secp256k1);
        let unknown = PublicKeyRecord { key_type: "Ed25519".into(), public_key: "1".into() };
        assert!(unknown.curve().is_err());
    }
}
