//! Bounded retry around a single [`Dispatch`] attempt
//!
//! Fixed attempt limit, fixed delay between attempts, no jitter and no
//! backoff. Transport errors and non-200 statuses are both retried; neither
//! escapes this module except as [`BoomipulseError::RetryExhausted`].

use std::time::Duration;
use tracing::{debug, warn};

use crate::client::{AttemptFailure, Dispatch, RawResponse};
use crate::credentials::Credentials;
use crate::errors::{BoomipulseError, Result};

pub const DEFAULT_RETRY_LIMIT: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub limit: u32,
    /// Sleep between consecutive attempts
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(limit: u32, delay: Duration) -> Self {
        Self {
            limit: limit.max(1),
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_LIMIT, DEFAULT_RETRY_DELAY)
    }
}

/// Result of one attempt, after status classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success(RawResponse),
    Failure(AttemptFailure),
}

impl AttemptOutcome {
    pub fn classify(result: std::result::Result<RawResponse, AttemptFailure>) -> Self {
        match result {
            Ok(response) if response.status == 200 => AttemptOutcome::Success(response),
            Ok(response) => AttemptOutcome::Failure(AttemptFailure::NonOkStatus(response.status)),
            Err(failure) => AttemptOutcome::Failure(failure),
        }
    }
}

/// Progress reported to the caller while retrying
#[derive(Debug)]
pub enum RetryEvent<'a> {
    /// About to send attempt `attempt` of `limit` (1-based)
    Attempt { attempt: u32, limit: u32 },
    /// Attempt `attempt` failed and the controller will sleep `delay`
    Retrying {
        attempt: u32,
        limit: u32,
        failure: &'a AttemptFailure,
        delay: Duration,
    },
}

/// Send `body` until the listener answers 200 or the policy runs out.
pub async fn dispatch_with_retry<D, F>(
    sender: &D,
    credentials: &Credentials,
    body: &str,
    policy: &RetryPolicy,
    mut on_event: F,
) -> Result<RawResponse>
where
    D: Dispatch,
    F: FnMut(RetryEvent<'_>),
{
    let limit = policy.limit.max(1);

    for attempt in 1..=limit {
        on_event(RetryEvent::Attempt { attempt, limit });

        match AttemptOutcome::classify(sender.send(credentials, body).await) {
            AttemptOutcome::Success(response) => {
                debug!(attempt, limit, "Attempt succeeded");
                return Ok(response);
            }
            AttemptOutcome::Failure(failure) => {
                warn!(attempt, limit, error = %failure, "Attempt failed");

                if attempt < limit {
                    on_event(RetryEvent::Retrying {
                        attempt,
                        limit,
                        failure: &failure,
                        delay: policy.delay,
                    });
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }

    Err(BoomipulseError::RetryExhausted { attempts: limit })
}
