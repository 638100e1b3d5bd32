// src/models/public_key.rs
//! Public-key canonicalization.
//!
//! A public key is stored in a DID document as the base-10 rendering of the
//! unsigned big-endian integer formed by its uncompressed SEC1 encoding
//! (`0x04 || X || Y`). The curve is identified through its registered ASN.1
//! object identifier; keys on curves outside the registry are rejected.

use crate::error::{DidError, Result};
use k256::elliptic_curve::{
    pkcs8::AssociatedOid,
    sec1::{FromEncodedPoint, ModulusSize, ToEncodedPoint},
    AffinePoint, CurveArithmetic, FieldBytesSize, PublicKey,
};
use num_bigint::BigUint;
use std::fmt;
use std::str::FromStr;

/// Object identifier of the `id-ecPublicKey` algorithm (RFC 5480).
pub const ECDSA_ALGORITHM_OID: &str = "1.2.840.10045.2.1";

/// Named curves with a registered object identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedCurve {
    P224,
    P256,
    P384,
    P521,
    Secp256k1,
}

impl NamedCurve {
    pub const ALL: [NamedCurve; 5] = [
        NamedCurve::P224,
        NamedCurve::P256,
        NamedCurve::P384,
        NamedCurve::P521,
        NamedCurve::Secp256k1,
    ];

    /// Dotted-decimal curve object identifier.
    pub fn oid(&self) -> &'static str {
        match self {
            NamedCurve::P224 => "1.3.132.0.33",
            NamedCurve::P256 => "1.2.840.10045.3.1.7",
            NamedCurve::P384 => "1.3.132.0.34",
            NamedCurve::P521 => "1.3.132.0.35",
            NamedCurve::Secp256k1 => "1.3.132.0.10",
        }
    }

    /// Curve identifier string used in the `type` field of key records and proofs.
    pub fn name(&self) -> &'static str {
        match self {
            NamedCurve::P224 => "P-224",
            NamedCurve::P256 => "P-256",
            NamedCurve::P384 => "P-384",
            NamedCurve::P521 => "P-521",
            NamedCurve::Secp256k1 => "Secp256k1",
        }
    }

    /// Width in bytes of one affine coordinate.
    pub fn field_size(&self) -> usize {
        match self {
            NamedCurve::P224 => 28,
            NamedCurve::P256 | NamedCurve::Secp256k1 => 32,
            NamedCurve::P384 => 48,
            NamedCurve::P521 => 66,
        }
    }

    /// Length of the uncompressed point encoding.
    pub fn uncompressed_len(&self) -> usize {
        1 + 2 * self.field_size()
    }

    /// Looks a curve up by its dotted object identifier.
    pub fn from_oid(oid: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|curve| curve.oid() == oid)
            .ok_or_else(|| DidError::UnsupportedCurve(oid.to_string()))
    }
}

impl fmt::Display for NamedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedCurve {
    type Err = DidError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|curve| curve.name() == s)
            .ok_or_else(|| DidError::UnsupportedCurve(s.to_string()))
    }
}

/// Canonical form of a public key: raw uncompressed point bytes and their
/// decimal rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalPublicKey {
    curve: NamedCurve,
    bytes: Vec<u8>,
    decimal: String,
}

impl CanonicalPublicKey {
    pub fn curve(&self) -> NamedCurve {
        self.curve
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn decimal(&self) -> &str {
        &self.decimal
    }

    /// `{algorithm-OID, curve-OID}` pair identifying the key in an SPKI wrapper.
    pub fn algorithm_identifier(&self) -> (&'static str, &'static str) {
        (ECDSA_ALGORITHM_OID, self.curve.oid())
    }
}

/// Canonicalizes a public key point.
///
/// # Errors
/// - `UnsupportedCurve` if the key's curve OID is not registered
/// - `InvalidPublicKey` if the encoding width disagrees with the registry
pub fn canonicalize<C>(public_key: &PublicKey<C>) -> Result<CanonicalPublicKey>
where
    C: CurveArithmetic + AssociatedOid,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let curve = NamedCurve::from_oid(&C::OID.to_string())?;
    let bytes = public_key.to_encoded_point(false).as_bytes().to_vec();
    if bytes.len() != curve.uncompressed_len() {
        return Err(DidError::InvalidPublicKey(format!(
            "expected {} bytes for {}, got {}",
            curve.uncompressed_len(),
            curve,
            bytes.len()
        )));
    }

    let decimal = BigUint::from_bytes_be(&bytes).to_str_radix(10);
    Ok(CanonicalPublicKey { curve, bytes, decimal })
}

/// Inverse of [`canonicalize`]: parses a decimal `publicKey` string back into a point.
pub fn decode_public_key<C>(decimal: &str) -> Result<PublicKey<C>>
where
    C: CurveArithmetic + AssociatedOid,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let curve = NamedCurve::from_oid(&C::OID.to_string())?;
    let bytes = decimal_to_point_bytes(curve, decimal)?;

    PublicKey::<C>::from_sec1_bytes(&bytes)
        .map_err(|_| DidError::InvalidPublicKey(format!("not a point on {}", curve)))
}

fn decimal_to_point_bytes(curve: NamedCurve, decimal: &str) -> Result<Vec<u8>> {
    if decimal.is_empty() || !decimal.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DidError::InvalidPublicKey("not a decimal string".into()));
    }
    let value = BigUint::parse_bytes(decimal.as_bytes(), 10)
        .ok_or_else(|| DidError::InvalidPublicKey("not a decimal string".into()))?;

    let raw = value.to_bytes_be();
    let expected = curve.uncompressed_len();
    if raw.len() > expected {
        return Err(DidError::InvalidPublicKey(format!(
            "{} bytes exceeds the {} encoding width",
            raw.len(),
            curve
        )));
    }

    // Left-pad; the 0x04 tag keeps well-formed keys at full width anyway.
    let mut bytes = vec![0u8; expected - raw.len()];
    bytes.extend_from_slice(&raw);
    Ok(bytes)
}
