//! Batch Processor
//!
//! Drives one request through decode → build tracker → invoke each
//! invocation in order → finalize → encode. Any failure short-circuits;
//! effects of a failed batch are dropped with its tracker and never encoded.

use crate::error::DispatchError;
use crate::registry::FunctionRegistry;
use crate::tracker::EffectTracker;
use codec::EnvelopeCodec;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, info_span};
use types::{FromFunction, InvocationBatchRequest, InvocationResponse, ToFunction};

#[derive(Debug, Clone)]
pub struct BatchProcessor {
    registry: Arc<FunctionRegistry>,
    codec: EnvelopeCodec,
}

impl BatchProcessor {
    pub fn new(registry: Arc<FunctionRegistry>) -> Self {
        Self::with_codec(registry, EnvelopeCodec::default())
    }

    pub fn with_codec(registry: Arc<FunctionRegistry>, codec: EnvelopeCodec) -> Self {
        Self { registry, codec }
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn codec(&self) -> &EnvelopeCodec {
        &self.codec
    }

    /// Decode a request body, process it and encode the response body
    pub fn process_bytes(&self, body: &[u8]) -> Result<Vec<u8>, DispatchError> {
        let request = self
            .codec
            .decode_request(body)
            .map_err(DispatchError::Decode)?;

        let response = self.process(request)?;

        self.codec
            .encode_response(&response)
            .map_err(DispatchError::Encode)
    }

    pub fn process(&self, request: ToFunction) -> Result<FromFunction, DispatchError> {
        match request {
            ToFunction::Invocation(batch) => {
                self.process_batch(batch).map(FromFunction::InvocationResult)
            }
        }
    }

    /// Run every invocation of `batch` against one shared tracker
    ///
    /// Invocations execute strictly in order, so later invocations observe
    /// state written by earlier ones. A batch without invocations yields an
    /// empty diff.
    pub fn process_batch(
        &self,
        batch: InvocationBatchRequest,
    ) -> Result<InvocationResponse, DispatchError> {
        let span = info_span!(
            "batch",
            target_address = %batch.target,
            invocations = batch.invocations.len()
        );
        let _enter = span.enter();
        let started = Instant::now();

        let InvocationBatchRequest {
            target,
            state,
            invocations,
        } = batch;

        let mut tracker = EffectTracker::new(target.clone(), &state);

        for (index, invocation) in invocations.into_iter().enumerate() {
            tracker.set_caller(invocation.caller);

            let function = self
                .registry
                .lookup(&target.function_type)
                .ok_or_else(|| DispatchError::FunctionNotFound(target.function_type.clone()))?;

            debug!(
                index,
                argument = %invocation.argument.type_url,
                "Invoking function"
            );

            if let Err(source) = function.invoke(&mut tracker, &invocation.argument) {
                error!(index, error = %source, "Function invocation failed, aborting batch");
                return Err(DispatchError::Handler {
                    target,
                    index,
                    source,
                });
            }
        }

        let response = tracker.finalize().map_err(DispatchError::Encode)?;

        info!(
            mutations = response.state_mutations.len(),
            outgoing = response.outgoing_messages.len(),
            delayed = response.delayed_invocations.len(),
            egress = response.outgoing_egresses.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Batch complete"
        );

        Ok(response)
    }
}
