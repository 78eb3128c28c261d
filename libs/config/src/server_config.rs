//! Server Configuration Module
//!
//! Loads the function server configuration from an optional TOML file with
//! `STATEFUN_`-prefixed environment variable overrides. Every key has a
//! default, so an empty source set yields a usable configuration.

use crate::protocol::defaults;
use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable prefix, e.g. `STATEFUN_PORT=9000`
pub const ENV_PREFIX: &str = "STATEFUN";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    /// Requests with larger bodies are refused before decoding
    pub max_request_bytes: u64,
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: defaults::BIND_ADDRESS.to_string(),
            port: defaults::PORT,
            max_request_bytes: defaults::MAX_REQUEST_BYTES,
            log_level: defaults::LOG_LEVEL.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from an optional file with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading server config: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(environment.try_parsing(true));

        let config = builder.build().context("Failed to build configuration")?;

        let server: ServerConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        server.validate()?;

        debug!("Server config: {:?}", server);
        Ok(server)
    }

    fn validate(&self) -> Result<()> {
        if self.max_request_bytes == 0 {
            anyhow::bail!("max_request_bytes must be greater than zero");
        }
        self.socket_addr()?;
        Ok(())
    }

    /// Address the server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid bind address {}:{}",
                    self.bind_address, self.port
                )
            })
    }
}
