//! End-to-End Test Framework for the function server
//!
//! Starts a real server on an ephemeral port and drives it over HTTP the
//! way the orchestration engine does.

pub mod fixtures;
pub mod framework;

pub use fixtures::*;
pub use framework::TestServer;
