pub mod document_builder;
pub mod identifier;
pub mod proof;
pub mod registry_client;
pub mod verifier;
