//! # evalwatch-client - Backend Transport
//!
//! Everything that talks to the evaluation backend:
//!
//! - [`LiveChannel`] - WebSocket connection delivering raw status frames
//! - [`Dispatcher`] - Issues control commands and refetches results on reset
//! - [`EvaluationBackend`] / [`HttpBackend`] - REST seam for commands and the results snapshot
//! - [`Endpoints`] - Validated, injectable endpoint configuration
//!
//! Frames are forwarded unparsed; classification lives in `evalwatch-core`.

pub mod backend;
pub mod commands;
pub mod endpoints;
pub mod live;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use backend::{EvaluationBackend, HttpBackend, LocalEvaluationBackend};
pub use commands::{
    Command, CommandAck, CommandOutcome, CommandResult, Dispatcher, UNREACHABLE_STATUS,
};
pub use endpoints::{Endpoints, DEFAULT_API_BASE, DEFAULT_LIVE_URL};
pub use live::{LiveChannel, LiveEvent};
