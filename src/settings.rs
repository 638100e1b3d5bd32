// src/settings.rs
//! Registry configuration.
//!
//! Values come from an optional `bsn-did.toml` (or any format the `config`
//! crate recognizes) overlaid with `BSN_DID_*` environment variables:
//! - `BSN_DID_SERVICE_URL`: registry base URL
//! - `BSN_DID_PROJECT_ID`: project identifier
//! - `BSN_DID_API_TOKEN`: API token
//! - `BSN_DID_TIMEOUT_MS`: (Optional) request timeout in milliseconds
//! - `BSN_DID_TIMEOUT_SECS`: (Optional) request timeout in seconds, default 30
//! - `BSN_DID_SIGN`: (Optional) value of the envelope's reserved `sign` field
//! - `BSN_DID_SUBMIT`: (Optional) whether the binary submits, default true
//!
//! There are no built-in defaults for the URL, project or token.

use crate::error::{DidError, Result};
use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;
use std::time::Duration;

pub const CONFIG_FILE: &str = "bsn-did";
pub const ENV_PREFIX: &str = "BSN_DID";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the DID registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    pub service_url: String,
    pub project_id: String,
    pub api_token: String,
    pub sign: String,
    /// Never zero
    timeout: Duration,
}

/// Shape of the registry keys as they appear in the settings sources.
#[derive(Deserialize)]
struct RegistrySection {
    service_url: String,
    project_id: String,
    api_token: String,
    timeout_ms: Option<u64>,
    timeout_secs: Option<u64>,
    #[serde(default)]
    sign: String,
}

impl RegistryConfig {
    pub fn new(service_url: impl Into<String>, project_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        RegistryConfig {
            service_url: service_url.into(),
            project_id: project_id.into(),
            api_token: api_token.into(),
            sign: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    ///
    /// # Errors
    /// `Config` if `timeout` is zero, which would fail every request.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(zero_timeout());
        }
        self.timeout = timeout;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Extracts the registry section from loaded settings.
    ///
    /// `timeout_ms` takes precedence over `timeout_secs`.
    pub fn from_settings(settings: &Config) -> Result<Self> {
        let section: RegistrySection = settings.clone().try_deserialize()?;
        let timeout = match (section.timeout_ms, section.timeout_secs) {
            (Some(ms), _) => Duration::from_millis(ms),
            (None, Some(secs)) => Duration::from_secs(secs),
            (None, None) => DEFAULT_TIMEOUT,
        };

        let config = RegistryConfig::new(section.service_url, section.project_id, section.api_token);
        Ok(RegistryConfig {
            sign: section.sign,
            ..config.with_timeout(timeout)?
        })
    }
}

fn zero_timeout() -> DidError {
    DidError::Config(ConfigError::Message("registry timeout must be greater than zero".into()))
}

/// Whether the created document should be submitted; true unless configured.
///
/// # Errors
/// `Config` if `submit` is present but not a boolean.
pub fn submit_enabled(settings: &Config) -> Result<bool> {
    match settings.get_bool("submit") {
        Ok(submit) => Ok(submit),
        Err(ConfigError::NotFound(_)) => Ok(true),
        Err(e) => Err(e.into()),
    }
}

/// The `BSN_DID_*` environment source.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
}

/// Builds the layered settings: optional file first, environment on top.
pub fn load_settings(file: Option<&str>) -> Result<Config> {
    layered_settings(
        File::with_name(file.unwrap_or(CONFIG_FILE)).required(false),
        environment(),
    )
}

fn layered_settings<S>(file: S, env: Environment) -> Result<Config>
where
    S: Source + Send + Sync + 'static,
{
    let settings = Config::builder().add_source(file).add_source(env).build()?;
    Ok(settings)
}
