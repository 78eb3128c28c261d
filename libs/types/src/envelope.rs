//! Batch request and response envelopes
//!
//! The orchestration engine sends one [`ToFunction`] per HTTP request. It
//! targets a single function instance, carries that instance's persisted
//! state snapshot and an ordered list of invocations. The function replies
//! with one [`FromFunction`] describing everything the batch produced.
//!
//! Both envelopes are enums with a single variant so the request/response
//! kinds can grow without breaking the wire layout of existing variants.

use crate::{Address, EgressIdentifier, TypedValue};
use serde::{Deserialize, Serialize};

/// Request envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToFunction {
    /// Batch of invocations for one function instance
    Invocation(InvocationBatchRequest),
}

/// Invocations for a single function instance plus its current state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationBatchRequest {
    /// Instance every invocation in the batch is addressed to
    pub target: Address,
    /// Snapshot of every declared state value for `target`
    pub state: Vec<PersistedValue>,
    /// Invocations in delivery order
    pub invocations: Vec<Invocation>,
}

/// One declared state value as stored by the orchestration engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedValue {
    pub state_name: String,
    /// Encoded [`TypedValue`]; empty when nothing has been stored yet
    pub state_value: Vec<u8>,
}

/// Single invocation inside a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Calling function, `None` when the message came from an ingress
    pub caller: Option<Address>,
    pub argument: TypedValue,
}

/// Response envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FromFunction {
    /// Diff produced by a fully executed batch
    InvocationResult(InvocationResponse),
}

impl FromFunction {
    pub fn invocation_result(&self) -> &InvocationResponse {
        match self {
            FromFunction::InvocationResult(response) => response,
        }
    }
}

/// State mutations and outbound messages accumulated over one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    pub state_mutations: Vec<PersistedValueMutation>,
    pub outgoing_messages: Vec<OutgoingInvocation>,
    pub delayed_invocations: Vec<DelayedInvocation>,
    pub outgoing_egresses: Vec<EgressMessage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationType {
    Delete,
    Modify,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedValueMutation {
    pub mutation_type: MutationType,
    pub state_name: String,
    /// Encoded [`TypedValue`]; empty for [`MutationType::Delete`]
    pub state_value: Vec<u8>,
}

/// Message to another function (or to this one)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingInvocation {
    pub target: Address,
    pub argument: TypedValue,
}

/// Message the orchestration engine must deliver after `delay_in_ms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedInvocation {
    pub target: Address,
    pub delay_in_ms: i64,
    pub argument: TypedValue,
}

/// Message to an egress channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EgressMessage {
    pub egress_namespace: String,
    pub egress_type: String,
    pub argument: TypedValue,
}

impl EgressMessage {
    pub fn new(egress: &EgressIdentifier, argument: TypedValue) -> Self {
        Self {
            egress_namespace: egress.namespace.clone(),
            egress_type: egress.egress_type.clone(),
            argument,
        }
    }

    pub fn egress(&self) -> EgressIdentifier {
        EgressIdentifier::new(self.egress_namespace.clone(), self.egress_type.clone())
    }
}
