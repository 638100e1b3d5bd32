// src/services/registry_client.rs
//! Registry client for on-chain DID document storage.
//!
//! Wraps a signed document in the registry envelope and POSTs it to the
//! "put document" endpoint. The client keeps no state between calls and
//! never retries; the registry decides how duplicate DIDs are handled.

use crate::error::{DidError, Result};
use crate::models::did::DidDocument;
use crate::settings::RegistryConfig;
use log::{debug, info, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Path of the "put document" endpoint.
pub const PUT_DID_ON_CHAIN: &str = "/did/putDoc";

/// `data` member of the envelope.
#[derive(Serialize, Debug)]
pub struct DataParam<'a> {
    #[serde(rename = "didDoc")]
    pub did_doc: &'a DidDocument,
}

/// Request body of the put-document call.
#[derive(Serialize, Debug)]
pub struct PutDidParam<'a> {
    #[serde(rename = "projectId")]
    pub project_id: &'a str,
    pub did: &'a str,
    pub data: DataParam<'a>,
    /// Reserved; the creation flow sends it empty
    pub sign: &'a str,
}

/// Response body of every registry call: `{code, msg, data}`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RegistryResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(rename = "msg", default)]
    pub message: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// HTTP client for the DID registry.
#[derive(Clone, Debug)]
pub struct RegistryClient {
    http: reqwest::Client,
    config: RegistryConfig,
}

impl RegistryClient {
    /// Creates a client whose requests time out after `config.timeout()`.
    pub fn new(config: RegistryConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { http, config })
    }

    pub fn put_doc_url(&self) -> String {
        format!("{}{}", self.config.service_url.trim_end_matches('/'), PUT_DID_ON_CHAIN)
    }

    /// Builds the envelope for `document`.
    pub fn envelope<'a>(&'a self, document: &'a DidDocument) -> PutDidParam<'a> {
        PutDidParam {
            project_id: &self.config.project_id,
            did: &document.did,
            data: DataParam { did_doc: document },
            sign: &self.config.sign,
        }
    }

    /// Submits a signed document to the registry.
    ///
    /// # Errors
    /// - `Transport` on network failure or timeout
    /// - `RegistrySubmission` on a non-200 status or a non-zero `code`,
    ///   carrying the server's `msg`
    pub async fn submit(&self, document: &DidDocument) -> Result<RegistryResponse> {
        let url = self.put_doc_url();
        debug!("submitting {} to {}", document.did, url);

        let res = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header("token", &self.config.api_token)
            .header("projectId", &self.config.project_id)
            .json(&self.envelope(document))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        let parsed: Option<RegistryResponse> = serde_json::from_str(&body).ok();

        if status != StatusCode::OK {
            let message = match &parsed {
                Some(response) if !response.message.is_empty() => response.message.clone(),
                _ => format!("HTTP {}", status),
            };
            warn!("registry returned {} for {}: {}", status, document.did, message);
            return Err(DidError::RegistrySubmission {
                code: parsed.map(|response| response.code),
                message,
            });
        }

        let response = parsed.unwrap_or_default();
        if response.code != 0 {
            warn!("registry rejected {}: code {}, {}", document.did, response.code, response.message);
            return Err(DidError::RegistrySubmission {
                code: Some(response.code),
                message: response.message,
            });
        }

        info!("stored {} in registry", document.did);
        Ok(response)
    }
}
