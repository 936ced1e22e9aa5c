//! HTTP client for the Boomi listener

pub mod http;

pub use http::{AttemptFailure, Dispatch, HttpSender, RawResponse};

#[cfg(test)]
pub(crate) mod testing;
