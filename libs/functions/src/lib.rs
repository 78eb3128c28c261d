//! # Stateful Function Runtime
//!
//! Execution core for remote stateful functions: receives a batch of
//! invocations for one function instance, replays its persisted state,
//! runs user logic against a transactional effect buffer and returns only
//! the state changes and messages actually produced.
//!
//! ## Components
//!
//! - [`EffectTracker`]: batch-scoped state slots and outbound message lists,
//!   exposed to user code through [`StatefulFunctionIo`]
//! - [`FunctionRegistry`]: `(namespace, type)` → [`StatefulFunction`]
//! - [`BatchProcessor`]: decode, dispatch sequentially, finalize, encode
//!
//! ## Example
//!
//! ```rust
//! use functions::{BatchProcessor, FunctionRegistry, StatefulFunctionIo};
//! use std::sync::Arc;
//! use types::{FunctionType, TypedValue};
//!
//! let mut registry = FunctionRegistry::new();
//! registry.register_fn(FunctionType::new("example", "echo"), |io, argument| {
//!     io.reply(Some(argument))?;
//!     Ok(())
//! });
//!
//! let processor = BatchProcessor::new(Arc::new(registry));
//! # let _ = processor;
//! ```
//!
//! Invocations within a batch never run concurrently; separate batches use
//! separate trackers and share nothing but the read-only registry.

pub mod error;
pub mod io;
pub mod processor;
pub mod registry;
pub mod tracker;

pub use error::{DispatchError, FunctionError};
pub use io::StatefulFunctionIo;
pub use processor::BatchProcessor;
pub use registry::{FunctionRegistry, StatefulFunction};
pub use tracker::EffectTracker;
