//! Request fixtures

use anyhow::{Context, Result};
use codec::{encode_state_value, wrap, PayloadMessage};
use function_server::greeter::{Counter, Invoke};
use types::{Address, Invocation, InvocationBatchRequest, PersistedValue, ToFunction, TypedValue};

pub fn greeter_address() -> Address {
    Address::new("remote", "greeter", "id")
}

pub fn caller_address() -> Address {
    Address::new("remote", "caller", "id2")
}

/// Wrap `message`, failing instead of producing an empty payload
pub fn packed(message: &dyn PayloadMessage) -> Result<TypedValue> {
    wrap(Some(message))?.with_context(|| format!("{} wrapped to nothing", message.type_name()))
}

pub fn persisted(name: &str, message: &dyn PayloadMessage) -> Result<PersistedValue> {
    let value = packed(message)?;
    let state_value = encode_state_value(&value)
        .with_context(|| format!("Failed to encode persisted state {}", name))?;

    Ok(PersistedValue {
        state_name: name.to_string(),
        state_value,
    })
}

/// Single-invocation batch for the greeter with three counters at 1
pub fn greeter_request() -> Result<ToFunction> {
    let one = Counter { count: 1 };

    Ok(ToFunction::Invocation(InvocationBatchRequest {
        target: greeter_address(),
        state: vec![
            persisted("modified-state", &one)?,
            persisted("deleted-state", &one)?,
            persisted("read-only-state", &one)?,
        ],
        invocations: vec![Invocation {
            caller: Some(caller_address()),
            argument: packed(&Invoke)?,
        }],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec::{decode_state_value, unwrap};

    #[test]
    fn test_greeter_request_is_fully_populated() {
        let ToFunction::Invocation(batch) = greeter_request().unwrap();

        assert_eq!(batch.invocations.len(), 1);
        assert_eq!(
            batch.invocations[0].argument.type_url,
            "type.googleapis.com/statefun.demo.Invoke"
        );

        for state in &batch.state {
            let value = decode_state_value(&state.state_value).unwrap();
            let mut counter = Counter::default();
            unwrap(&value, Some(&mut counter)).unwrap();
            assert_eq!(counter.count, 1, "{}", state.state_name);
        }
    }
}
