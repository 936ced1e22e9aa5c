//! Single POST attempt against the listener
//!
//! No retry and no status interpretation live here: whatever status the
//! server answers with is passed through in [`RawResponse`].

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::credentials::Credentials;
use crate::errors::{BoomipulseError, Result};

const USER_AGENT_STRING: &str = concat!("boomipulse/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `"200 OK"`-style status line
    pub fn status_line(&self) -> String {
        match reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
        {
            Some(reason) => format!("{} {}", self.status, reason),
            None => self.status.to_string(),
        }
    }
}

/// Why one attempt did not produce a usable response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttemptFailure {
    #[error("{0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    NonOkStatus(u16),
}

/// Sends one serialized envelope. Implementations only report transport
/// failures; every HTTP status comes back as `Ok`.
pub trait Dispatch {
    fn send(
        &self,
        credentials: &Credentials,
        body: &str,
    ) -> impl Future<Output = std::result::Result<RawResponse, AttemptFailure>> + Send;
}

/// reqwest-backed sender bound to one listener URL
#[derive(Debug, Clone)]
pub struct HttpSender {
    client: Client,
    url: Url,
}

impl HttpSender {
    /// Build the sender. `timeout` bounds each attempt; `None` keeps
    /// reqwest's default (no overall timeout).
    pub fn new(url: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT_STRING);

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| BoomipulseError::Transport(format!("Failed to build client: {}", e)))?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Dispatch for HttpSender {
    async fn send(
        &self,
        credentials: &Credentials,
        body: &str,
    ) -> std::result::Result<RawResponse, AttemptFailure> {
        debug!(url = %self.url, bytes = body.len(), "Sending request");

        let response = self
            .client
            .post(self.url.clone())
            .basic_auth(&credentials.username, Some(credentials.password.as_str()))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body.to_owned())
            .send()
            .await
            .map_err(describe_transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(describe_transport_error)?;

        debug!(status, bytes = body.len(), "Received response");
        Ok(RawResponse { status, body })
    }
}

fn describe_transport_error(e: reqwest::Error) -> AttemptFailure {
    let msg = if e.is_timeout() {
        format!("Timeout: {}", e)
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    };
    AttemptFailure::Transport(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line() {
        assert_eq!(RawResponse::new(200, "").status_line(), "200 OK");
        assert_eq!(RawResponse::new(503, "").status_line(), "503 Service Unavailable");
        assert_eq!(RawResponse::new(599, "").status_line(), "599");
    }

    #[test]
    fn test_attempt_failure_display() {
        assert_eq!(AttemptFailure::NonOkStatus(502).to_string(), "HTTP status 502");
        assert_eq!(AttemptFailure::Transport("refused".into()).to_string(), "refused");
    }
}
