//! # Stateful Function Server
//!
//! HTTP front end for the function runtime. The orchestration engine POSTs
//! an encoded invocation batch; the server validates the request, runs the
//! batch and answers with the encoded effect diff.
//!
//! ## Status Codes
//!
//! | Status | Meaning |
//! |--------|---------|
//! | 200 | Batch processed, body is the encoded response |
//! | 400 | Empty or undecodable body |
//! | 405 | Method other than POST |
//! | 413 | Body larger than `max_request_bytes` |
//! | 415 | Content type other than `application/octet-stream` |
//! | 500 | Unknown function, handler or encoding failure |

pub mod greeter;
pub mod server;
pub mod validation;

pub use greeter::Greeter;
pub use server::{FunctionServer, RequestHandler, ServeError};
pub use validation::RequestRejection;
