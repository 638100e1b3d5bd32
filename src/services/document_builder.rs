// src/services/document_builder.rs
//! Document assembly and the end-to-end creation flow.
//!
//! keys → base document → identifier → DID → document → proof

use crate::error::Result;
use crate::models::did::{BaseDidDocument, DidDocument, DOCUMENT_VERSION};
use crate::services::identifier::derive_did;
use crate::services::proof::attach_proof;
use crate::wallet::key_management::DidKeys;
use chrono::{DateTime, Utc};
use log::info;

/// Timestamp layout of `created` / `updated`. Always rendered in UTC.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Assembles an unsigned document stamped with the current time.
pub fn assemble_document(did: &str, base_document: &BaseDidDocument) -> DidDocument {
    assemble_document_at(did, base_document, Utc::now())
}

/// Assembles an unsigned document with an explicit creation time.
///
/// `created` and `updated` are equal; the base document's context marker
/// never reaches the result.
pub fn assemble_document_at(did: &str, base_document: &BaseDidDocument, at: DateTime<Utc>) -> DidDocument {
    let timestamp = at.format(TIMESTAMP_FORMAT).to_string();

    DidDocument {
        created: timestamp.clone(),
        recovery: base_document.recovery.clone(),
        updated: timestamp,
        version: DOCUMENT_VERSION.to_string(),
        did: did.to_string(),
        authentication: base_document.authentication.clone(),
        proof: None,
    }
}

/// Builds a signed document for the given keys.
pub fn build_signed_document(keys: &DidKeys) -> Result<DidDocument> {
    let base_document = BaseDidDocument::from_public_keys(&keys.primary.public_key, &keys.alternate.public_key)?;
    let did = derive_did(&base_document)?;
    let document = assemble_document(&did, &base_document);
    attach_proof(document, &keys.primary)
}

/// Generates fresh keys and a signed DID document.
///
/// The caller owns the returned keys and must persist the private scalars;
/// nothing here stores or submits anything.
pub fn create_did_document() -> Result<(DidDocument, DidKeys)> {
    let keys = DidKeys::generate();
    let document = build_signed_document(&keys)?;
    info!("created DID document for {}", document.did);
    Ok((document, keys))
}
