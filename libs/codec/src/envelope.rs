//! Envelope wire codec
//!
//! Request and response envelopes, and the persisted bytes of individual
//! state values, are bincode encoded with varint integers. Decoding rejects
//! trailing bytes so a truncated or padded body never half-parses.

use crate::constants::DEFAULT_MAX_ENVELOPE_BYTES;
use crate::error::{CodecError, CodecResult};
use bincode::Options;
use tracing::trace;
use types::{FromFunction, ToFunction, TypedValue};

fn encode_options() -> impl Options {
    bincode::DefaultOptions::new()
}

fn decode_options(limit: u64) -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(limit)
        .reject_trailing_bytes()
}

/// Encoder/decoder for [`ToFunction`] and [`FromFunction`] envelopes
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeCodec {
    max_envelope_bytes: u64,
}

impl Default for EnvelopeCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENVELOPE_BYTES)
    }
}

impl EnvelopeCodec {
    pub fn new(max_envelope_bytes: u64) -> Self {
        Self { max_envelope_bytes }
    }

    pub fn max_envelope_bytes(&self) -> u64 {
        self.max_envelope_bytes
    }

    pub fn decode_request(&self, bytes: &[u8]) -> CodecResult<ToFunction> {
        trace!(bytes = bytes.len(), "decoding request envelope");
        decode_options(self.max_envelope_bytes)
            .deserialize(bytes)
            .map_err(|e| CodecError::decode("request envelope", e))
    }

    pub fn encode_request(&self, request: &ToFunction) -> CodecResult<Vec<u8>> {
        encode_options()
            .serialize(request)
            .map_err(|e| CodecError::encode("request envelope", e))
    }

    pub fn decode_response(&self, bytes: &[u8]) -> CodecResult<FromFunction> {
        decode_options(self.max_envelope_bytes)
            .deserialize(bytes)
            .map_err(|e| CodecError::decode("response envelope", e))
    }

    pub fn encode_response(&self, response: &FromFunction) -> CodecResult<Vec<u8>> {
        let bytes = encode_options()
            .serialize(response)
            .map_err(|e| CodecError::encode("response envelope", e))?;
        trace!(bytes = bytes.len(), "encoded response envelope");
        Ok(bytes)
    }
}

/// Encode a state value the way the orchestration engine persists it
pub fn encode_state_value(value: &TypedValue) -> CodecResult<Vec<u8>> {
    encode_options()
        .serialize(value)
        .map_err(|e| CodecError::encode("state value", e))
}

/// Decode persisted state value bytes
///
/// Empty input is a value that was declared but never written and decodes to
/// an empty [`TypedValue`].
pub fn decode_state_value(bytes: &[u8]) -> CodecResult<TypedValue> {
    if bytes.is_empty() {
        return Ok(TypedValue::default());
    }
    decode_options(DEFAULT_MAX_ENVELOPE_BYTES)
        .deserialize(bytes)
        .map_err(|e| CodecError::decode("state value", e))
}
