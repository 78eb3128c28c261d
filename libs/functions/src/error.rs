//! Error types for effect tracking and batch dispatch

use codec::CodecError;
use thiserror::Error;
use types::{Address, FunctionType};

/// Misuse of the effect tracker, returned to the calling function
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FunctionError {
    /// State name was not declared in the batch's persisted snapshot
    #[error("unknown state name {0}")]
    UnknownState(String),

    #[error("cannot send nil message to {destination}")]
    NilMessage { destination: &'static str },

    /// `reply` called for an invocation that came from an ingress
    #[error("cannot reply to nil caller")]
    NoCaller,

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl FunctionError {
    pub(crate) fn nil_message_to_function() -> Self {
        Self::NilMessage {
            destination: "function",
        }
    }

    pub(crate) fn nil_message_to_egress() -> Self {
        Self::NilMessage {
            destination: "egress",
        }
    }
}

/// Failure to process a whole batch
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Request envelope could not be decoded
    #[error("malformed request: {0}")]
    Decode(#[source] CodecError),

    #[error("unknown function type {0}")]
    FunctionNotFound(FunctionType),

    /// User logic failed; the batch is aborted and its effects discarded
    #[error("function {target} failed on invocation {index}: {source}")]
    Handler {
        target: Address,
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    /// Accumulated diff could not be encoded
    #[error("failed to encode response: {0}")]
    Encode(#[source] CodecError),
}

impl DispatchError {
    /// True when the request itself was at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, DispatchError::Decode(_))
    }

    pub fn category(&self) -> &'static str {
        match self {
            DispatchError::Decode(_) => "decode",
            DispatchError::FunctionNotFound(_) => "function_not_found",
            DispatchError::Handler { .. } => "handler",
            DispatchError::Encode(_) => "encode",
        }
    }
}
