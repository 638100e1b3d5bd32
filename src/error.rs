// src/error.rs
//! Error type shared by the DID derivation, signing and submission pipeline.

use thiserror::Error;

/// Errors produced while building, signing, verifying or submitting a DID document.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DidError {
    /// The public key lives on a curve with no registered object identifier.
    #[error("unsupported elliptic curve: {0}")]
    UnsupportedCurve(String),

    /// A `publicKey` record could not be decoded back into a curve point.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Private key material could not be parsed.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Canonical JSON encoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The signature primitive rejected its input.
    #[error("signing error: {0}")]
    Signing(String),

    /// The signing key does not match the document's authentication key.
    #[error("signing key does not match the authentication key")]
    WrongSigningKey,

    /// The proof is missing, malformed, or does not verify.
    #[error("invalid proof: {0}")]
    InvalidProof(String),

    /// The registry answered with a non-200 status or a non-zero code.
    #[error("registry rejected document (code {code:?}): {message}")]
    RegistrySubmission {
        code: Option<i64>,
        message: String,
    },

    /// Network-level failure talking to the registry.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Registry configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, DidError>;
