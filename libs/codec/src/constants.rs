//! Codec constants

/// Prefix for type URLs produced by [`crate::type_url`]
///
/// Matches the prefix Any-style consumers expect so payloads can cross into
/// other SDKs without rewriting.
pub const TYPE_URL_PREFIX: &str = "type.googleapis.com/";

/// Upper bound on a decoded request envelope (16 MiB)
pub const DEFAULT_MAX_ENVELOPE_BYTES: u64 = 16 * 1024 * 1024;
