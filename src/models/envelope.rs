//! Wire envelopes exchanged with the Boomi listener
//!
//! The request carries a microsecond send-time identifier plus the user
//! payload; the response echoes the identifier back as `incoming_timestamp`
//! and adds the moment Boomi processed it as `boomi_timestamp`.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::errors::{BoomipulseError, Result};

/// Body sent to the listener, serialized as indented JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestEnvelope {
    #[serde(rename = "unix_request_to_boomi")]
    pub send_id: String,
    #[serde(rename = "payload_request_to_boomi")]
    pub payload: String,
}

impl RequestEnvelope {
    pub fn new(send_id: u64, payload: impl Into<String>) -> Self {
        Self {
            send_id: send_id.to_string(),
            payload: payload.into(),
        }
    }

    /// Indented JSON, exactly as it goes over the wire
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Body returned by the listener.
///
/// Both timestamps are decimal strings that may carry noise characters
/// (`"ts:1000000"`); see [`crate::timing::clean_timestamp`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "full_response_from_boomi")]
    pub summary: String,
    pub incoming_timestamp: String,
    #[serde(rename = "boomi_timestamp")]
    pub server_timestamp: String,
}

impl ResponseEnvelope {
    /// Parse a response body; any structural problem is terminal for the cycle
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(BoomipulseError::MalformedResponseBody)
    }
}

/// Issues send-time identifiers: the current Unix time in microseconds,
/// bumped past the previous value so identifiers never repeat or go backwards.
#[derive(Debug, Default)]
pub struct IdClock {
    last: Option<u64>,
}

impl IdClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> u64 {
        self.next_id_at(unix_micros_now())
    }

    fn next_id_at(&mut self, now_us: u64) -> u64 {
        let id = match self.last {
            Some(last) if now_us <= last => last + 1,
            _ => now_us,
        };
        self.last = Some(id);
        id
    }
}

/// Current wall-clock time as microseconds since the Unix epoch
pub fn unix_micros_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}
