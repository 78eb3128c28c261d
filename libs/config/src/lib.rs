//! # Stateful Function Server Configuration
//!
//! Centralized configuration and constants for the function server.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use statefun_config::{ServerConfig, CONTENT_TYPE};
//!
//! let config = ServerConfig::load(None)?;
//! println!("serving {} on {}", CONTENT_TYPE, config.socket_addr()?);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod protocol;
pub mod server_config;

pub use protocol::{defaults, CONTENT_TYPE};
pub use server_config::{ServerConfig, ENV_PREFIX};
