// src/wallet/key_management.rs
//! Key material for DID creation.
//!
//! Provides generation of secp256k1 key pairs (via the `k256` crate) and
//! recoverable ECDSA signing over a 32-byte digest. A DID is controlled by
//! two independent pairs: the primary (authentication) key and the
//! alternate (recovery) key.

use crate::error::{DidError, Result};
use ethers_core::utils::hex;
use k256::ecdsa::{RecoveryId, Signature, SigningKey};
use k256::{PublicKey, SecretKey};

/// Length of a recoverable signature: `r (32) || s (32) || v (1)`.
pub const RECOVERABLE_SIGNATURE_LEN: usize = 65;

/// A secp256k1 key pair.
///
/// # Security Notes
/// - The secret scalar is never serialized into any document
/// - `Debug` output shows the public half only
#[derive(Clone)]
pub struct KeyPair {
    /// Securely stored private key (never exposed)
    secret_key: SecretKey,
    /// Derived public key for verification
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Generates a key pair from the thread-local CSPRNG.
    pub fn generate() -> Self {
        Self::from_secret_key(SecretKey::random(&mut rand::thread_rng()))
    }

    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let public_key = secret_key.public_key();
        KeyPair {
            secret_key,
            public_key,
        }
    }

    /// Restores a key pair from a hex-encoded scalar (with or without 0x prefix).
    pub fn from_secret_hex(secret: &str) -> Result<Self> {
        let bytes = hex::decode(secret.trim_start_matches("0x"))
            .map_err(|e| DidError::InvalidPrivateKey(format!("not hex: {}", e)))?;
        let secret_key = SecretKey::from_slice(&bytes)
            .map_err(|_| DidError::InvalidPrivateKey("scalar out of range".into()))?;
        Ok(Self::from_secret_key(secret_key))
    }

    /// Hex encoding of the 32-byte secret scalar, for the caller to persist.
    pub fn secret_hex(&self) -> String {
        hex::encode(self.secret_key.to_bytes())
    }

    /// Signs a 32-byte digest with ECDSA, returning `r || s || v`.
    ///
    /// Signatures are deterministic (RFC 6979) and low-S normalized; `v` is
    /// the recovery id (0 or 1).
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<[u8; RECOVERABLE_SIGNATURE_LEN]> {
        let signing_key = SigningKey::from(&self.secret_key);
        let (signature, recovery_id): (Signature, RecoveryId) = signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|e| DidError::Signing(e.to_string()))?;

        let mut out = [0u8; RECOVERABLE_SIGNATURE_LEN];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = recovery_id.to_byte();
        Ok(out)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// The two key pairs that control a DID.
#[derive(Clone, Debug)]
pub struct DidKeys {
    /// Authentication key; signs the document proof
    pub primary: KeyPair,
    /// Recovery key; never used for routine signing
    pub alternate: KeyPair,
}

impl DidKeys {
    pub fn generate() -> Self {
        DidKeys {
            primary: KeyPair::generate(),
            alternate: KeyPair::generate(),
        }
    }
}
