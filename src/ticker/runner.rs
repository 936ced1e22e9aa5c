//! Ticker task: scheduled lines once per tick, then an in-place spinner
//!
//! The run is a two-state machine. `Scheduled` prints one entry per tick and
//! moves to `Spinning` once the cursor reaches the end of the schedule;
//! `Spinning` redraws the spinner line until a signal or the deadline.

use std::time::Duration;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::handle::TickerHandle;
use super::schedule::Schedule;
use super::sink::ProgressSink;

/// Default interval between scheduled lines
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Default redraw cadence of the spinner line
pub const DEFAULT_SPIN_INTERVAL: Duration = Duration::from_millis(1);

/// Default ceiling on one ticker run
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(60);

const SPINNER: [char; 4] = ['-', '\\', '|', '/'];

/// Spinner glyph for the given spin time: advances every half second
pub fn spinner_glyph(elapsed: Duration) -> char {
    let step = (elapsed.as_secs_f64() * 2.0).floor() as usize;
    SPINNER[step % SPINNER.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerConfig {
    pub tick: Duration,
    pub spin_interval: Duration,
    pub deadline: Duration,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            spin_interval: DEFAULT_SPIN_INTERVAL,
            deadline: DEFAULT_DEADLINE,
        }
    }
}

/// Why a ticker run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerExit {
    /// "stop-now": remaining entries were flushed
    Stopped,
    /// "work-done": ended without further output
    Done,
    TimedOut,
    /// The task panicked or was cancelled by the runtime
    Aborted,
}

/// What a ticker run printed before returning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerReport {
    pub emitted: usize,
    pub flushed: usize,
    pub spins: u64,
    pub exit: TickerExit,
}

impl TickerReport {
    pub(crate) fn new(exit: TickerExit) -> Self {
        Self {
            emitted: 0,
            flushed: 0,
            spins: 0,
            exit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickerState {
    Scheduled { cursor: usize },
    Spinning { since: Instant },
}

enum Step {
    Continue(TickerState),
    Exit(TickerExit),
}

/// One ticker run; spawn it once per request cycle
pub struct Ticker<S> {
    schedule: Schedule,
    config: TickerConfig,
    sink: S,
    report: TickerReport,
    deadline: Instant,
}

impl<S: ProgressSink> Ticker<S> {
    /// Start the ticker on the current tokio runtime
    pub fn spawn(schedule: Schedule, config: TickerConfig, sink: S) -> TickerHandle {
        let stop = CancellationToken::new();
        let done = CancellationToken::new();

        let ticker = Ticker {
            schedule,
            config,
            sink,
            report: TickerReport::new(TickerExit::Aborted),
            deadline: Instant::now() + config.deadline,
        };
        let task = tokio::spawn(ticker.run(stop.clone(), done.clone()));

        TickerHandle::new(stop, done, task)
    }

    async fn run(mut self, stop: CancellationToken, done: CancellationToken) -> TickerReport {
        let start = Instant::now();
        let mut ticks = time::interval_at(start + self.config.tick, self.config.tick);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut spins = time::interval(self.config.spin_interval);
        spins.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut state = TickerState::Scheduled { cursor: 0 };
        let exit = loop {
            let step = match state {
                TickerState::Scheduled { cursor } => {
                    self.scheduled(cursor, &mut ticks, &stop, &done).await
                }
                TickerState::Spinning { since } => {
                    self.spinning(since, &mut spins, &stop, &done).await
                }
            };
            match step {
                Step::Continue(next) => state = next,
                Step::Exit(exit) => break exit,
            }
        };

        self.sink.finish();
        self.report.exit = exit;
        debug!(
            emitted = self.report.emitted,
            flushed = self.report.flushed,
            spins = self.report.spins,
            exit = ?exit,
            "Ticker finished"
        );
        self.report
    }

    async fn scheduled(
        &mut self,
        cursor: usize,
        ticks: &mut Interval,
        stop: &CancellationToken,
        done: &CancellationToken,
    ) -> Step {
        if cursor >= self.schedule.len() {
            return Step::Continue(TickerState::Spinning { since: Instant::now() });
        }

        tokio::select! {
            biased;
            _ = stop.cancelled() => {
                self.flush_from(cursor);
                Step::Exit(TickerExit::Stopped)
            }
            _ = done.cancelled() => Step::Exit(TickerExit::Done),
            _ = time::sleep_until(self.deadline) => self.time_out(),
            _ = ticks.tick() => {
                if let Some(entry) = self.schedule.get(cursor) {
                    self.sink.entry(cursor, entry, false);
                    self.report.emitted += 1;
                }
                Step::Continue(TickerState::Scheduled { cursor: cursor + 1 })
            }
        }
    }

    async fn spinning(
        &mut self,
        since: Instant,
        spins: &mut Interval,
        stop: &CancellationToken,
        done: &CancellationToken,
    ) -> Step {
        tokio::select! {
            biased;
            _ = stop.cancelled() => Step::Exit(TickerExit::Stopped),
            _ = done.cancelled() => Step::Exit(TickerExit::Done),
            _ = time::sleep_until(self.deadline) => self.time_out(),
            _ = spins.tick() => {
                let elapsed = since.elapsed();
                self.sink.spin(elapsed, spinner_glyph(elapsed));
                self.report.spins += 1;
                Step::Continue(TickerState::Spinning { since })
            }
        }
    }

    fn flush_from(&mut self, cursor: usize) {
        for index in cursor..self.schedule.len() {
            if let Some(entry) = self.schedule.get(index) {
                self.sink.entry(index, entry, true);
                self.report.flushed += 1;
            }
        }
    }

    fn time_out(&mut self) -> Step {
        self.sink.timed_out(self.config.deadline);
        Step::Exit(TickerExit::TimedOut)
    }
}
