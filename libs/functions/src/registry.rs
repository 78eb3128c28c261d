//! Function Registry
//!
//! Maps a [`FunctionType`] to the [`StatefulFunction`] that handles it.
//! The registry is populated before serving starts and is read-only
//! afterwards, so it is shared behind an `Arc` without locking.

use crate::io::StatefulFunctionIo;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};
use types::{FunctionType, TypedValue};

/// User logic for one function type
///
/// `invoke` runs once per invocation with the batch's shared effect tracker.
/// Returning an error aborts the rest of the batch and discards its effects.
pub trait StatefulFunction: Send + Sync {
    fn invoke(&self, io: &mut dyn StatefulFunctionIo, argument: &TypedValue) -> anyhow::Result<()>;
}

impl<F> StatefulFunction for F
where
    F: Fn(&mut dyn StatefulFunctionIo, &TypedValue) -> anyhow::Result<()> + Send + Sync,
{
    fn invoke(&self, io: &mut dyn StatefulFunctionIo, argument: &TypedValue) -> anyhow::Result<()> {
        self(io, argument)
    }
}

/// Lookup table from function type to handler
#[derive(Default)]
pub struct FunctionRegistry {
    functions: HashMap<FunctionType, Box<dyn StatefulFunction>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `function` for `function_type`, replacing any earlier one
    pub fn register<F>(&mut self, function_type: FunctionType, function: F) -> &mut Self
    where
        F: StatefulFunction + 'static,
    {
        debug!("Registering function: {}", function_type);

        if self
            .functions
            .insert(function_type.clone(), Box::new(function))
            .is_some()
        {
            warn!("Replaced existing function registration: {}", function_type);
        }
        self
    }

    /// Register a closure as a function
    pub fn register_fn<F>(&mut self, function_type: FunctionType, function: F) -> &mut Self
    where
        F: Fn(&mut dyn StatefulFunctionIo, &TypedValue) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.register(function_type, function)
    }

    pub fn lookup(&self, function_type: &FunctionType) -> Option<&dyn StatefulFunction> {
        self.functions.get(function_type).map(|function| function.as_ref())
    }

    pub fn contains(&self, function_type: &FunctionType) -> bool {
        self.functions.contains_key(function_type)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registered function types, sorted
    pub fn function_types(&self) -> Vec<&FunctionType> {
        let mut types: Vec<_> = self.functions.keys().collect();
        types.sort();
        types
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.function_types())
            .finish()
    }
}
