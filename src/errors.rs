//! Error types for boomipulse

use thiserror::Error;

/// Main error type for boomipulse
#[derive(Error, Debug)]
pub enum BoomipulseError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Exceeded retry limit after {attempts} attempts. Please check your network connection, and try again.")]
    RetryExhausted { attempts: u32 },

    #[error("Malformed timestamp in `{field}`: {raw:?}")]
    MalformedTimestamp { field: &'static str, raw: String },

    #[error("Malformed response body: {0}")]
    MalformedResponseBody(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Interrupted")]
    Interrupted,
}

impl BoomipulseError {
    /// Whether this error ends the run because the response itself was unusable
    pub fn is_malformed_response(&self) -> bool {
        matches!(
            self,
            BoomipulseError::MalformedTimestamp { .. } | BoomipulseError::MalformedResponseBody(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BoomipulseError>;
