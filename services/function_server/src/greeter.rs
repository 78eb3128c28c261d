//! Demo greeter function served by the binary
//!
//! Counts how often each instance has been invoked, greets the caller both
//! immediately and again a minute later, and publishes the greeting to an
//! egress.

use anyhow::Context;
use codec::{impl_payload_message, unwrap};
use functions::{StatefulFunction, StatefulFunctionIo};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use types::{EgressIdentifier, FunctionType, TypedValue};

pub const GREETER_NAMESPACE: &str = "remote";
pub const GREETER_TYPE: &str = "greeter";

pub const EGRESS_NAMESPACE: &str = "test";
pub const EGRESS_TYPE: &str = "egress";

/// State slot holding the invocation count
pub const SEEN_STATE: &str = "modified-state";
/// State slot cleared on every invocation
pub const SCRATCH_STATE: &str = "deleted-state";
/// State slot the greeter reads but never writes
pub const READ_ONLY_STATE: &str = "read-only-state";

pub const GREETING_DELAY: Duration = Duration::from_secs(60);

/// Argument that triggers a greeting
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoke;

impl_payload_message!(Invoke, "statefun.demo.Invoke");

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    pub count: i32,
}

impl_payload_message!(Counter, "statefun.demo.Counter");

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Greeting {
    pub greeting: String,
}

impl_payload_message!(Greeting, "statefun.demo.Greeting");

#[derive(Debug, Clone)]
pub struct Greeter {
    greeting: String,
}

impl Greeter {
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            greeting: greeting.into(),
        }
    }

    pub fn function_type() -> FunctionType {
        FunctionType::new(GREETER_NAMESPACE, GREETER_TYPE)
    }

    pub fn egress() -> EgressIdentifier {
        EgressIdentifier::new(EGRESS_NAMESPACE, EGRESS_TYPE)
    }
}

impl Default for Greeter {
    fn default() -> Self {
        Self::new("Hello")
    }
}

impl StatefulFunction for Greeter {
    fn invoke(&self, io: &mut dyn StatefulFunctionIo, argument: &TypedValue) -> anyhow::Result<()> {
        let mut invoke = Invoke;
        unwrap(argument, Some(&mut invoke)).context("greeter expects an Invoke argument")?;

        let caller = io
            .caller()
            .cloned()
            .context("greeter must be invoked by another function")?;

        let mut seen = Counter::default();
        io.get(SEEN_STATE, &mut seen)?;
        seen.count += 1;

        let mut read_only = Counter::default();
        io.get(READ_ONLY_STATE, &mut read_only)?;

        let greeting = Greeting {
            greeting: self.greeting.clone(),
        };

        io.reply(Some(&greeting))?;
        io.send_after(&caller, GREETING_DELAY, Some(&greeting))?;
        io.send_egress(&Self::egress(), Some(&greeting))?;

        io.set(SEEN_STATE, Some(&seen))?;
        io.clear(SCRATCH_STATE);

        // Writes to other slots must leave this one as it was
        let mut after = Counter::default();
        io.get(READ_ONLY_STATE, &mut after)?;
        anyhow::ensure!(
            after == read_only,
            "{} changed from {} to {} within the batch",
            READ_ONLY_STATE,
            read_only.count,
            after.count
        );

        Ok(())
    }
}
