//! Canned [`Dispatch`] implementation for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::time::Instant;

use super::{AttemptFailure, Dispatch, RawResponse};
use crate::credentials::Credentials;

pub type Scripted = Result<RawResponse, AttemptFailure>;

/// Replays canned results in order and records when each attempt happened.
/// Once the script runs out every attempt is a transport failure.
#[derive(Default)]
pub struct ScriptedSender {
    script: Mutex<VecDeque<Scripted>>,
    sent: Mutex<Vec<(Instant, String)>>,
}

impl ScriptedSender {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn attempt_times(&self) -> Vec<Instant> {
        self.sent.lock().unwrap().iter().map(|(at, _)| *at).collect()
    }

    pub fn bodies(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(_, body)| body.clone()).collect()
    }
}

impl Dispatch for ScriptedSender {
    async fn send(&self, _credentials: &Credentials, body: &str) -> Scripted {
        self.sent.lock().unwrap().push((Instant::now(), body.to_string()));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AttemptFailure::Transport("script exhausted".into())))
    }
}

pub fn refused() -> Scripted {
    Err(AttemptFailure::Transport("connection refused".into()))
}

pub fn ok_body(incoming_us: i64, server_us: i64) -> Scripted {
    Ok(RawResponse::new(
        200,
        format!(
            r#"{{"full_response_from_boomi":"processed","incoming_timestamp":"{}","boomi_timestamp":"ts:{}"}}"#,
            incoming_us, server_us
        ),
    ))
}
