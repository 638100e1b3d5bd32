// src/lib.rs

//! # BSN DID
//!
//! Creates self-certifying `did:bsn` identifiers and signed DID documents
//! from secp256k1 key pairs, and submits them to the BSN DID registry.
//!
//! ## Pipeline
//! 1. **Canonicalizer** (`models::public_key`): public key → decimal record
//! 2. **Identifier Deriver** (`services::identifier`): base document → base58 identifier
//! 3. **Document Assembler** (`services::document_builder`): identifier → document
//! 4. **Proof Signer** (`services::proof`): document → signed document
//! 5. **Registry Client** (`services::registry_client`): signed document → registry
//!
//! Everything up to the registry call is synchronous and free of side effects.

pub mod error;
pub mod models;
pub mod services;
pub mod settings;
pub mod utils;
pub mod wallet;

pub use error::{DidError, Result};
pub use models::did::{did_from_identifier, BaseDidDocument, DidDocument, Proof, PublicKeyRecord};
pub use services::document_builder::{assemble_document, create_did_document};
pub use services::identifier::derive_identifier;
pub use services::proof::attach_proof;
pub use services::registry_client::RegistryClient;
pub use services::verifier::verify_proof;
pub use settings::RegistryConfig;
pub use wallet::key_management::{DidKeys, KeyPair};
