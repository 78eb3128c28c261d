//! Codec errors
//!
//! Every variant carries enough context to tell which payload failed and
//! why. Underlying bincode errors are flattened to strings so the error
//! stays `Clone + PartialEq` for assertions.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    /// `unwrap` was given no receiver to decode into
    #[error("cannot unwrap payload into a nil receiver")]
    NilReceiver,

    /// Payload type URL differs from the receiver's message type
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Bytes could not be decoded
    #[error("failed to decode {context}: {reason}")]
    Decode {
        context: &'static str,
        reason: String,
    },

    /// Value could not be encoded
    #[error("failed to encode {context}: {reason}")]
    Encode {
        context: &'static str,
        reason: String,
    },
}

impl CodecError {
    pub fn decode(context: &'static str, error: bincode::Error) -> Self {
        Self::Decode {
            context,
            reason: error.to_string(),
        }
    }

    pub fn encode(context: &'static str, error: bincode::Error) -> Self {
        Self::Encode {
            context,
            reason: error.to_string(),
        }
    }

    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// True for failures caused by malformed input rather than by the caller
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::TypeMismatch { .. })
    }
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;
