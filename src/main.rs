// src/main.rs

//! # BSN DID - Main Entry Point
//!
//! Creates a fresh DID document and stores it in the BSN DID registry.
//!
//! ## Output
//! A JSON object on stdout holding the signed document and the hex-encoded
//! primary and alternate private keys. The keys exist nowhere else: persist them.
//!
//! ## Environment Variables
//! - `BSN_DID_SERVICE_URL`: registry base URL
//! - `BSN_DID_PROJECT_ID`: registry project id
//! - `BSN_DID_API_TOKEN`: registry API token
//! - `BSN_DID_TIMEOUT_MS` / `BSN_DID_TIMEOUT_SECS`: (Optional) request timeout (default: 30s)
//! - `BSN_DID_SUBMIT`: (Optional) set to `false` to skip submission (default: true)
//! - `RUST_LOG`: (Optional) log filter, e.g. `bsn_did=debug`

use anyhow::Context;
use bsn_did::services::document_builder::create_did_document;
use bsn_did::services::registry_client::RegistryClient;
use bsn_did::settings::{load_settings, submit_enabled, RegistryConfig};
use bsn_did::utils::serialization::pretty_json;
use dotenv::dotenv;
use log::info;
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();
    env_logger::init();

    let settings = load_settings(None).context("failed to load settings")?;
    let submit = submit_enabled(&settings).context("BSN_DID_SUBMIT must be a boolean")?;

    let (document, keys) = create_did_document().context("failed to create DID document")?;

    let output = json!({
        "didDocument": document,
        "primaryPrivateKey": keys.primary.secret_hex(),
        "alternatePrivateKey": keys.alternate.secret_hex(),
    });
    println!("{}", pretty_json(&output)?);

    if !submit {
        info!("submission disabled, not contacting the registry");
        return Ok(());
    }

    let config = RegistryConfig::from_settings(&settings).context("registry configuration is incomplete")?;
    let client = RegistryClient::new(config)?;
    let response = client
        .submit(&document)
        .await
        .with_context(|| format!("failed to store {} in the registry", document.did))?;
    info!("registry answered: {}", response.message);

    Ok(())
}
