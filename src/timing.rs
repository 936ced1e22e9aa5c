//! Response interpretation and round-trip metrics
//!
//! Turns a successful listener reply into [`TimingFacts`]: how long the
//! message spent between being stamped and being processed by Boomi, how much
//! of the elapsed time was spent locally, and the total elapsed time.

use chrono::{DateTime, Local, TimeDelta};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;
use tokio::time::Instant;

use crate::errors::{BoomipulseError, Result};
use crate::models::ResponseEnvelope;

static NON_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9]+").expect("Invalid non-digit regex"));

/// Strip everything but ASCII digits and parse the remainder as microseconds
/// since the Unix epoch.
pub fn clean_timestamp(field: &'static str, raw: &str) -> Result<i64> {
    let cleaned = NON_DIGIT_RE.replace_all(raw, "");
    let malformed = || BoomipulseError::MalformedTimestamp {
        field,
        raw: raw.to_string(),
    };

    if cleaned.is_empty() {
        return Err(malformed());
    }
    // Digits only, so this can only fail on overflow
    cleaned.parse::<i64>().map_err(|_| malformed())
}

/// When a cycle started, on both the monotonic and the wall clock
#[derive(Debug, Clone, Copy)]
pub struct CycleStart {
    pub instant: Instant,
    pub wall: DateTime<Local>,
}

impl CycleStart {
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
            wall: Local::now(),
        }
    }
}

/// Per-cycle timing, computed once from a single frozen "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingFacts {
    pub started_at: DateTime<Local>,
    pub incoming_us: i64,
    pub server_us: i64,
    /// Server-observed transit; negative when the clocks disagree
    pub transit: TimeDelta,
    /// Elapsed time not accounted for by transit
    pub local_overhead: TimeDelta,
    pub total_elapsed: Duration,
}

impl TimingFacts {
    pub fn compute(response: &ResponseEnvelope, start: CycleStart, now: Instant) -> Result<Self> {
        let incoming_us = clean_timestamp("incoming_timestamp", &response.incoming_timestamp)?;
        let server_us = clean_timestamp("boomi_timestamp", &response.server_timestamp)?;

        let transit = TimeDelta::microseconds(server_us - incoming_us);
        let total_elapsed = now.saturating_duration_since(start.instant);
        let elapsed = TimeDelta::from_std(total_elapsed).unwrap_or(TimeDelta::MAX);
        let local_overhead = elapsed.checked_sub(&transit).unwrap_or(elapsed);

        Ok(Self {
            started_at: start.wall,
            incoming_us,
            server_us,
            transit,
            local_overhead,
            total_elapsed,
        })
    }

    /// Absolute time at which Boomi processed the request
    pub fn server_processed_at(&self) -> Option<DateTime<Local>> {
        DateTime::from_timestamp_micros(self.server_us).map(|t| t.with_timezone(&Local))
    }
}

/// Parse a response body and derive its timing, freezing "now" at the call
pub fn interpret(body: &str, start: CycleStart) -> Result<(ResponseEnvelope, TimingFacts)> {
    let now = Instant::now();
    let response = ResponseEnvelope::parse(body)?;
    let facts = TimingFacts::compute(&response, start, now)?;
    Ok((response, facts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(incoming: &str, server: &str) -> ResponseEnvelope {
        ResponseEnvelope {
            summary: "ok".to_string(),
            incoming_timestamp: incoming.to_string(),
            server_timestamp: server.to_string(),
        }
    }

    #[test]
    fn test_clean_timestamp_strips_noise() {
        assert_eq!(clean_timestamp("incoming_timestamp", "ts:1000000").unwrap(), 1_000_000);
        assert_eq!(clean_timestamp("incoming_timestamp", " 1,002,500 µs").unwrap(), 1_002_500);
        assert_eq!(clean_timestamp("incoming_timestamp", "-42").unwrap(), 42);
    }

    #[test]
    fn test_clean_timestamp_empty() {
        let err = clean_timestamp("boomi_timestamp", "abc").unwrap_err();
        match err {
            BoomipulseError::MalformedTimestamp { field, raw } => {
                assert_eq!(field, "boomi_timestamp");
                assert_eq!(raw, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(clean_timestamp("boomi_timestamp", "").is_err());
    }

    #[test]
    fn test_clean_timestamp_overflow() {
        let err = clean_timestamp("boomi_timestamp", "99999999999999999999999").unwrap_err();
        assert!(matches!(err, BoomipulseError::MalformedTimestamp { .. }));
    }

    #[test]
    fn test_compute_transit() {
        let start = CycleStart::now();
        let now = start.instant + Duration::from_millis(10);
        let facts = TimingFacts::compute(&response("ts:1000000", "ts:1002500"), start, now).unwrap();

        assert_eq!(facts.incoming_us, 1_000_000);
        assert_eq!(facts.server_us, 1_002_500);
        assert_eq!(facts.transit, TimeDelta::microseconds(2500));
        assert_eq!(facts.total_elapsed, Duration::from_millis(10));
        assert_eq!(facts.local_overhead, TimeDelta::microseconds(7500));
    }

    #[test]
    fn test_compute_negative_transit() {
        let start = CycleStart::now();
        let now = start.instant + Duration::from_millis(1);
        let facts = TimingFacts::compute(&response("2000", "1000"), start, now).unwrap();

        assert_eq!(facts.transit, TimeDelta::microseconds(-1000));
        assert_eq!(facts.local_overhead, TimeDelta::microseconds(2000));
    }

    #[test]
    fn test_server_processed_at() {
        let start = CycleStart::now();
        let facts = TimingFacts::compute(
            &response("1700000000000000", "1700000000002500"),
            start,
            start.instant,
        )
        .unwrap();
        let processed = facts.server_processed_at().unwrap();
        assert_eq!(processed.timestamp_micros(), 1_700_000_000_002_500);
    }

    #[test]
    fn test_interpret_rejects_bad_body() {
        let err = interpret("not json", CycleStart::now()).unwrap_err();
        assert!(matches!(err, BoomipulseError::MalformedResponseBody(_)));

        let body = r#"{"full_response_from_boomi":"ok","incoming_timestamp":"abc","boomi_timestamp":"1"}"#;
        let err = interpret(body, CycleStart::now()).unwrap_err();
        assert!(matches!(err, BoomipulseError::MalformedTimestamp { field: "incoming_timestamp", .. }));
    }
}
