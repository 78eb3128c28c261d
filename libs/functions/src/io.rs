//! The context a stateful function sees during one invocation

use crate::error::FunctionError;
use codec::PayloadMessage;
use std::time::Duration;
use types::{Address, EgressIdentifier};

pub type Result<T> = std::result::Result<T, FunctionError>;

/// Effects available to a function while it processes one invocation
///
/// Provides the function's own [`Address`] and its caller's, reads and writes
/// of declared state values, and outbound messages to other functions
/// (including itself, optionally delayed) and to egresses. Nothing is
/// visible to the outside world until the whole batch completes.
///
/// Message arguments are `Option`s: an absent message is a caller error,
/// reported as [`FunctionError::NilMessage`]; an absent state value is a
/// deletion.
pub trait StatefulFunctionIo {
    /// Address of the function instance under evaluation
    fn self_address(&self) -> &Address;

    /// Address of the calling function, `None` when invoked from an ingress
    fn caller(&self) -> Option<&Address>;

    /// Decode the named state value into `state`
    ///
    /// Leaves `state` untouched when the value was never written. Fails for
    /// undeclared names and on type or decode mismatches.
    fn get(&self, name: &str, state: &mut dyn PayloadMessage) -> Result<()>;

    /// Store `value` under `name`; `None` deletes the value
    fn set(&mut self, name: &str, value: Option<&dyn PayloadMessage>) -> Result<()>;

    /// Delete the named state value
    fn clear(&mut self, name: &str);

    /// Invoke another function
    fn send(&mut self, target: &Address, message: Option<&dyn PayloadMessage>) -> Result<()>;

    /// Invoke the caller of the current invocation
    fn reply(&mut self, message: Option<&dyn PayloadMessage>) -> Result<()>;

    /// Invoke another function after `delay`
    ///
    /// The delay is recorded, never awaited; the orchestration engine
    /// delivers the message durably once it elapses.
    fn send_after(
        &mut self,
        target: &Address,
        delay: Duration,
        message: Option<&dyn PayloadMessage>,
    ) -> Result<()>;

    /// Emit a message on an egress channel
    fn send_egress(
        &mut self,
        egress: &EgressIdentifier,
        message: Option<&dyn PayloadMessage>,
    ) -> Result<()>;
}
