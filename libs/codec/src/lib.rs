//! # Stateful Function Codec
//!
//! ## Purpose
//!
//! Encoding rules for everything that crosses the function boundary:
//! - **Opaque payloads**: [`wrap`]/[`unwrap`] between application messages
//!   and [`TypedValue`]s, driven by the [`PayloadMessage`] trait
//! - **Envelopes**: [`EnvelopeCodec`] for batch requests and responses
//! - **State values**: [`encode_state_value`]/[`decode_state_value`] for the
//!   per-slot bytes inside an envelope
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → [codec] → libs/functions
//!     ↑           ↓            ↓
//! Pure Data   Encoding     Effect Tracking
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Transport concerns (content types, status codes)
//! - State tracking or dispatch

pub mod constants;
pub mod envelope;
pub mod error;
pub mod payload;

pub use constants::{DEFAULT_MAX_ENVELOPE_BYTES, TYPE_URL_PREFIX};
pub use envelope::{decode_state_value, encode_state_value, EnvelopeCodec};
pub use error::{CodecError, CodecResult};
pub use payload::{type_url, unwrap, wrap, PayloadMessage};
pub use types::TypedValue;
