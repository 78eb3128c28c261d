//! Transport protocol constants
//!
//! The orchestration engine speaks a fixed binary request/reply protocol over
//! HTTP. These values must match what it sends.

/// Only content type accepted for batch requests and produced for replies
pub const CONTENT_TYPE: &str = "application/octet-stream";

/// Server defaults
pub mod defaults {
    pub const BIND_ADDRESS: &str = "127.0.0.1";

    pub const PORT: u16 = 8000;

    /// Largest request body read before decoding (16 MiB)
    pub const MAX_REQUEST_BYTES: u64 = 16 * 1024 * 1024;

    pub const LOG_LEVEL: &str = "info";
}
