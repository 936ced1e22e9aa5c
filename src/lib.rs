//! boomipulse library interface
//!
//! Sends operator-entered payloads to a Boomi web-service listener and reports
//! how long the round trip took, with a status ticker running while the
//! request is in flight.
//!
//! # Module Organization
//!
//! - [`session`] - Interactive cycle: input, send, report, continue
//! - [`ticker`] - Status ticker (scheduled lines, then a spinner)
//! - [`client`] - HTTP sender for the listener
//! - [`retry`] - Bounded fixed-delay retry around the sender
//! - [`timing`] - Response interpretation and round-trip metrics
//! - [`errors`] - Error types (BoomipulseError, Result)
//! - [`status`] - Exit status codes (ExitStatus)
//! - [`core`] - Main execution logic

pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod core;
pub mod credentials;
pub mod errors;
pub mod logging;
pub mod models;
pub mod output;
pub mod retry;
pub mod session;
pub mod signals;
pub mod status;
pub mod ticker;
pub mod timing;
