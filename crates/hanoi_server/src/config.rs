//! Server configuration.

use derive_getters::Getters;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Configuration for the HTTP server.
///
/// Loadable from a TOML file; every field has a default so a partial
/// file (or none at all) works. Command-line flags override the file.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind to.
    #[serde(default = "default_port")]
    port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading server config");
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        info!(host = %config.host, port = config.port, "Loaded server config");
        Ok(config)
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn apply_overrides(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
    }

    /// The `host:port` string to bind the listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Failure to load the configuration file.
#[derive(Debug, Display, From)]
pub enum ConfigError {
    /// The file could not be read.
    #[display("Failed to read config file: {}", _0)]
    Read(std::io::Error),

    /// The file is not valid TOML for this config.
    #[display("Failed to parse config file: {}", _0)]
    Parse(toml::de::Error),
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read(inner) => Some(inner),
            ConfigError::Parse(inner) => Some(inner),
        }
    }
}
