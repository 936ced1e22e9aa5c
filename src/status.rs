//! Exit status codes for the CLI
//!
//! - 0: the user ended the session by declining another payload
//! - 1: retries exhausted, malformed response, or a setup error
//! - 130: user interrupted (Ctrl+C, standard SIGINT exit code)

use std::process::{ExitCode, Termination};

use crate::errors::BoomipulseError;

/// Exit status codes following standard Unix conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// Session ended normally
    Success = 0,
    /// Any error that terminated the session
    Error = 1,
    /// User interrupted (Ctrl+C) - standard SIGINT code
    Interrupted = 130,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

impl ExitStatus {
    /// Map a terminal session error to the process exit status
    pub fn from_error(err: &BoomipulseError) -> Self {
        match err {
            BoomipulseError::Interrupted => ExitStatus::Interrupted,
            _ => ExitStatus::Error,
        }
    }
}
