// src/utils/serialization.rs
//! Serialization utilities for the DID system.
//!
//! The bytes produced here are cryptographic inputs: identifiers are hashed
//! from them and proofs are signed over them. Field order is the struct
//! declaration order, keys are rendered exactly as named by the serde
//! attributes, and no whitespace is emitted.

use crate::error::Result;
use serde::Serialize;

/// Serializes a value to its canonical compact JSON bytes.
pub fn canonical_json<T: Serialize + ?Sized>(data: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(data)?)
}

/// Serializes a value to an indented JSON string for display.
pub fn pretty_json<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}
