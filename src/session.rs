//! Session orchestration: one payload per cycle until the user stops
//!
//! ```text
//! AwaitingInput -> Sending -> Reporting -> AwaitingContinue -> AwaitingInput
//!                     |           |               |
//!                     +-----------+---------------+--> Terminated
//! ```
//!
//! A cycle acquires credentials, reads a payload, spawns the status ticker,
//! and sends the envelope through the retry controller. The ticker is always
//! joined before the session prints anything of its own. Exhausted retries
//! and malformed responses both end the run.

use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::client::{Dispatch, RawResponse};
use crate::credentials::CredentialSource;
use crate::errors::{BoomipulseError, Result};
use crate::models::{IdClock, RequestEnvelope, ResponseEnvelope};
use crate::retry::{dispatch_with_retry, RetryEvent, RetryPolicy};
use crate::signals;
use crate::ticker::{ProgressSink, Schedule, Ticker, TickerConfig, TickerReport};
use crate::timing::{self, CycleStart, TimingFacts};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Sending,
    Reporting,
    AwaitingContinue,
    Terminated,
}

/// Every payload that completed a cycle, in entry order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadHistory {
    entries: Vec<String>,
}

impl PayloadHistory {
    pub fn push(&mut self, payload: impl Into<String>) {
        self.entries.push(payload.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything shown once a cycle succeeds
#[derive(Debug)]
pub struct CycleReport<'a> {
    pub payload: &'a str,
    pub response: &'a RawResponse,
    pub envelope: &'a ResponseEnvelope,
    pub timing: &'a TimingFacts,
    /// Screen setup and credential lookup, before the payload prompt
    pub init_elapsed: Duration,
    pub history: &'a PayloadHistory,
    pub ticker: TickerReport,
}

/// Terminal interaction around a cycle
pub trait Console {
    /// Called at the top of every cycle, before credentials are acquired
    fn begin_cycle(&mut self) -> Result<()>;

    fn read_payload(&mut self) -> Result<String>;

    /// Raw answer to "Again (Y/N)"; end of input should read as a decline
    fn read_continue(&mut self) -> Result<String>;

    /// Fresh sink for this cycle's ticker
    fn progress_sink(&mut self) -> Box<dyn ProgressSink>;

    fn request_event(&mut self, event: &RetryEvent<'_>, body: &str);

    fn report(&mut self, report: &CycleReport<'_>) -> Result<()>;
}

/// Only a lone `y` or `Y` continues the session
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

pub struct Session<D, C, K> {
    sender: D,
    credentials: C,
    console: K,
    policy: RetryPolicy,
    schedule: Schedule,
    ticker_config: TickerConfig,
    history: PayloadHistory,
    ids: IdClock,
    state: SessionState,
    interrupted: fn() -> bool,
}

impl<D, C, K> Session<D, C, K>
where
    D: Dispatch,
    C: CredentialSource,
    K: Console,
{
    pub fn new(sender: D, credentials: C, console: K) -> Self {
        Self {
            sender,
            credentials,
            console,
            policy: RetryPolicy::default(),
            schedule: Schedule::boomi(),
            ticker_config: TickerConfig::default(),
            history: PayloadHistory::default(),
            ids: IdClock::new(),
            state: SessionState::AwaitingInput,
            interrupted: signals::was_interrupted,
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_ticker_config(mut self, config: TickerConfig) -> Self {
        self.ticker_config = config;
        self
    }

    /// Replace the Ctrl+C check polled between states
    pub fn with_interrupt_check(mut self, interrupted: fn() -> bool) -> Self {
        self.interrupted = interrupted;
        self
    }

    pub fn history(&self) -> &PayloadHistory {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn console(&self) -> &K {
        &self.console
    }

    /// Run cycles until the user declines (`Ok`) or a cycle fails (`Err`)
    pub async fn run(&mut self) -> Result<()> {
        let result = self.drive().await;
        self.state = SessionState::Terminated;
        if let Err(e) = &result {
            info!(error = %e, payloads = self.history.len(), "Session terminated");
        }
        result
    }

    async fn drive(&mut self) -> Result<()> {
        loop {
            self.enter(SessionState::AwaitingInput)?;
            self.run_cycle().await?;

            self.enter(SessionState::AwaitingContinue)?;
            let answer = self.console.read_continue()?;
            if !is_affirmative(&answer) {
                info!(payloads = self.history.len(), "Session finished");
                return Ok(());
            }
        }
    }

    /// One AwaitingInput -> Sending -> Reporting pass
    async fn run_cycle(&mut self) -> Result<()> {
        let init_started = Instant::now();
        self.console.begin_cycle()?;
        let credentials = self.credentials.acquire()?;
        let init_elapsed = init_started.elapsed();
        let payload = self.console.read_payload()?;

        let send_id = self.ids.next_id();
        let body = RequestEnvelope::new(send_id, payload.as_str()).to_json_pretty()?;
        info!(send_id, bytes = body.len(), "Payload accepted");

        self.enter(SessionState::Sending)?;
        let start = CycleStart::now();
        let ticker = Ticker::spawn(
            self.schedule.clone(),
            self.ticker_config,
            self.console.progress_sink(),
        );

        let console = &mut self.console;
        let outcome = dispatch_with_retry(&self.sender, &credentials, &body, &self.policy, |event| {
            console.request_event(&event, &body)
        })
        .await;

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                let report = ticker.retire().await;
                debug!(?report, "Ticker retired after failed send");
                return Err(e);
            }
        };
        let ticker_report = ticker.stop().await;

        self.enter(SessionState::Reporting)?;
        let (envelope, timing) = timing::interpret(&response.body, start)?;
        self.history.push(payload.as_str());

        self.console.report(&CycleReport {
            payload: &payload,
            response: &response,
            envelope: &envelope,
            timing: &timing,
            init_elapsed,
            history: &self.history,
            ticker: ticker_report,
        })
    }

    fn enter(&mut self, state: SessionState) -> Result<()> {
        if (self.interrupted)() {
            return Err(BoomipulseError::Interrupted);
        }
        debug!(from = ?self.state, to = ?state, "Session state");
        self.state = state;
        Ok(())
    }
}
