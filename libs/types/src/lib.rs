//! # Stateful Function Types
//!
//! Pure data definitions shared by every crate in the workspace.
//!
//! ## Contents
//!
//! - **Identifiers**: [`FunctionType`], [`Address`] and [`EgressIdentifier`]
//!   name function instances and egress channels.
//! - **Opaque payloads**: [`TypedValue`] carries an application message as a
//!   type URL plus bytes; nothing below user code ever interprets the bytes.
//! - **Envelopes**: [`ToFunction`] is the batch request sent by the
//!   orchestration engine, [`FromFunction`] is the diff returned to it.
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → libs/codec → libs/functions → services/function_server
//!     ↑             ↓              ↓                    ↓
//! Pure Data    Wire Encoding   Effect Tracking      HTTP Transport
//! ```
//!
//! This crate holds no encoding logic. Serialization rules (bincode layout,
//! size limits, type URL checks) belong in `codec`.

pub mod address;
pub mod envelope;
pub mod typed_value;

pub use address::{Address, EgressIdentifier, FunctionType};
pub use envelope::{
    DelayedInvocation, EgressMessage, FromFunction, Invocation, InvocationBatchRequest,
    InvocationResponse, MutationType, OutgoingInvocation, PersistedValue,
    PersistedValueMutation, ToFunction,
};
pub use typed_value::TypedValue;
