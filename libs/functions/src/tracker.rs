//! Effect tracker
//!
//! One [`EffectTracker`] lives for exactly one batch. It is built from the
//! batch target and persisted state snapshot, handed by `&mut` to every
//! invocation in order, and consumed by [`EffectTracker::finalize`] to
//! produce the diff returned to the orchestration engine.

use crate::error::FunctionError;
use crate::io::{Result, StatefulFunctionIo};
use codec::{decode_state_value, encode_state_value, unwrap, wrap, CodecResult, PayloadMessage};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};
use types::{
    Address, DelayedInvocation, EgressIdentifier, EgressMessage, InvocationResponse,
    MutationType, OutgoingInvocation, PersistedValue, PersistedValueMutation, TypedValue,
};

/// One declared state value
#[derive(Debug, Clone, PartialEq)]
struct StateSlot {
    /// Set by any `set`/`clear`, even when the value did not change
    dirty: bool,
    value: Option<TypedValue>,
}

/// Batch-scoped transactional context for a function instance
#[derive(Debug)]
pub struct EffectTracker {
    self_address: Address,
    caller: Option<Address>,
    states: BTreeMap<String, StateSlot>,
    outgoing_messages: Vec<OutgoingInvocation>,
    delayed_invocations: Vec<DelayedInvocation>,
    outgoing_egresses: Vec<EgressMessage>,
}

impl EffectTracker {
    /// Build a tracker for `self_address` from its persisted state snapshot
    ///
    /// The declared state names are fixed from here on. A persisted value
    /// that fails to decode leaves its slot valueless instead of failing the
    /// batch, so one corrupt entry cannot wedge the instance.
    pub fn new(self_address: Address, persisted_values: &[PersistedValue]) -> Self {
        let mut states = BTreeMap::new();

        for persisted in persisted_values {
            let value = match decode_state_value(&persisted.state_value) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(
                        target_address = %self_address,
                        state = %persisted.state_name,
                        error = %e,
                        "Ignoring undecodable persisted state value"
                    );
                    None
                }
            };

            states.insert(
                persisted.state_name.clone(),
                StateSlot {
                    dirty: false,
                    value,
                },
            );
        }

        Self {
            self_address,
            caller: None,
            states,
            outgoing_messages: Vec::new(),
            delayed_invocations: Vec::new(),
            outgoing_egresses: Vec::new(),
        }
    }

    /// Rebind the caller before dispatching the next invocation
    pub fn set_caller(&mut self, caller: Option<Address>) {
        self.caller = caller;
    }

    /// Names of every declared state value
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    /// Produce the batch diff
    ///
    /// Emits one mutation per dirty slot, `Delete` when its value is absent
    /// and `Modify` otherwise, followed by the outbound messages in call
    /// order.
    pub fn finalize(self) -> CodecResult<InvocationResponse> {
        let mut state_mutations = Vec::new();

        for (state_name, slot) in self.states {
            if !slot.dirty {
                continue;
            }

            let mutation = match slot.value {
                None => PersistedValueMutation {
                    mutation_type: MutationType::Delete,
                    state_name,
                    state_value: Vec::new(),
                },
                Some(value) => PersistedValueMutation {
                    mutation_type: MutationType::Modify,
                    state_name,
                    state_value: encode_state_value(&value)?,
                },
            };
            state_mutations.push(mutation);
        }

        debug!(
            mutations = state_mutations.len(),
            outgoing = self.outgoing_messages.len(),
            delayed = self.delayed_invocations.len(),
            egress = self.outgoing_egresses.len(),
            "Finalized effects"
        );

        Ok(InvocationResponse {
            state_mutations,
            outgoing_messages: self.outgoing_messages,
            delayed_invocations: self.delayed_invocations,
            outgoing_egresses: self.outgoing_egresses,
        })
    }

    fn pack_message(
        message: Option<&dyn PayloadMessage>,
        nil_error: fn() -> FunctionError,
    ) -> Result<TypedValue> {
        let message = message.ok_or_else(nil_error)?;
        Ok(message.pack()?)
    }
}

impl StatefulFunctionIo for EffectTracker {
    fn self_address(&self) -> &Address {
        &self.self_address
    }

    fn caller(&self) -> Option<&Address> {
        self.caller.as_ref()
    }

    fn get(&self, name: &str, state: &mut dyn PayloadMessage) -> Result<()> {
        let slot = self
            .states
            .get(name)
            .ok_or_else(|| FunctionError::UnknownState(name.to_string()))?;

        match &slot.value {
            Some(value) if !value.is_empty() => Ok(unwrap(value, Some(state))?),
            _ => Ok(()),
        }
    }

    fn set(&mut self, name: &str, value: Option<&dyn PayloadMessage>) -> Result<()> {
        let slot = self
            .states
            .get_mut(name)
            .ok_or_else(|| FunctionError::UnknownState(name.to_string()))?;

        let packed = wrap(value)?;
        slot.dirty = true;
        slot.value = packed;
        Ok(())
    }

    fn clear(&mut self, name: &str) {
        if let Err(e) = self.set(name, None) {
            warn!(state = %name, error = %e, "Ignoring failed clear");
        }
    }

    fn send(&mut self, target: &Address, message: Option<&dyn PayloadMessage>) -> Result<()> {
        let argument = Self::pack_message(message, FunctionError::nil_message_to_function)?;

        self.outgoing_messages.push(OutgoingInvocation {
            target: target.clone(),
            argument,
        });
        Ok(())
    }

    fn reply(&mut self, message: Option<&dyn PayloadMessage>) -> Result<()> {
        let caller = self.caller.clone().ok_or(FunctionError::NoCaller)?;
        self.send(&caller, message)
    }

    fn send_after(
        &mut self,
        target: &Address,
        delay: Duration,
        message: Option<&dyn PayloadMessage>,
    ) -> Result<()> {
        let argument = Self::pack_message(message, FunctionError::nil_message_to_function)?;
        let delay_in_ms = i64::try_from(delay.as_millis()).unwrap_or(i64::MAX);

        self.delayed_invocations.push(DelayedInvocation {
            target: target.clone(),
            delay_in_ms,
            argument,
        });
        Ok(())
    }

    fn send_egress(
        &mut self,
        egress: &EgressIdentifier,
        message: Option<&dyn PayloadMessage>,
    ) -> Result<()> {
        let argument = Self::pack_message(message, FunctionError::nil_message_to_egress)?;

        self.outgoing_egresses.push(EgressMessage::new(egress, argument));
        Ok(())
    }
}
