//! Server configuration, read once from the environment at startup

use config::{Config, Environment};
use serde::Deserialize;
use smsfilter_classifiers::{DEFAULT_ARTIFACT_PATH, DEFAULT_RELEASES_URL, LATEST};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Prefix of the server's environment variables (`MODEL_PORT`, ...)
const ENV_PREFIX: &str = "MODEL";

/// Unprefixed debug toggle
const DEBUG_VAR: &str = "DEBUG";

#[derive(Debug, Error)]
pub enum ServerConfigError {
    #[error(transparent)]
    Build(#[from] config::ConfigError),

    #[error("invalid listen address {0}")]
    InvalidAddress(String),
}

/// Server configuration
///
/// | Variable         | Field              | Default                 |
/// |------------------|--------------------|-------------------------|
/// | `MODEL_HOST`     | `host`             | `0.0.0.0`               |
/// | `MODEL_PORT`     | `port`             | `8081`                  |
/// | `MODEL_VERSION`  | `model_version`    | `latest`                |
/// | `MODEL_URL`      | `legacy_model_url` | unset, ignored          |
/// | `MODEL_ARTIFACT` | `artifact_path`    | `output/model.joblib`   |
/// | `MODEL_RELEASES` | `releases_url`     | project release page    |
/// | `DEBUG`          | `debug`            | `false`                 |
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub host: String,

    /// Listen port
    pub port: u16,

    /// Release to download when no artifact is on disk
    #[serde(rename = "version")]
    pub model_version: Option<String>,

    /// Accepted for compatibility, never used
    #[serde(rename = "url", default)]
    pub legacy_model_url: Option<String>,

    /// Local model artifact
    #[serde(rename = "artifact")]
    pub artifact_path: PathBuf,

    /// Base URL of the release host
    #[serde(rename = "releases")]
    pub releases_url: String,

    /// Debug logging and request tracing
    pub debug: bool,
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self, ServerConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Load configuration from an explicit variable map
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ServerConfigError> {
        let debug = vars
            .get(DEBUG_VAR)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"));

        let mut config: Self = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8081)?
            .set_default("version", LATEST)?
            .set_default("artifact", DEFAULT_ARTIFACT_PATH)?
            .set_default("releases", DEFAULT_RELEASES_URL)?
            .add_source(
                // Values stay strings so a version like "1.0" is not read as a float
                Environment::with_prefix(ENV_PREFIX).source(Some(vars)),
            )
            .set_override("debug", debug)?
            .build()?
            .try_deserialize()?;

        // An empty MODEL_VERSION selects nothing
        config.model_version = config.model_version.filter(|v| !v.trim().is_empty());
        config.legacy_model_url = config.legacy_model_url.filter(|v| !v.is_empty());

        Ok(config)
    }

    /// Socket address to bind
    pub fn listen_addr(&self) -> Result<SocketAddr, ServerConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ServerConfigError::InvalidAddress(addr))
    }
}
