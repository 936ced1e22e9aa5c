//! Status ticker shown while a request is outstanding
//!
//! One ticker is spawned per request cycle and runs beside the HTTP call.
//! It prints the [`Schedule`] one entry per second, then switches to an
//! in-place spinner until the session stops it or its deadline passes.
//!
//! ```ignore
//! let ticker = Ticker::spawn(Schedule::boomi(), TickerConfig::default(), sink);
//! let response = send_with_retries().await;
//! let report = ticker.stop().await; // flushes, then joins
//! ```

mod handle;
mod runner;
pub mod schedule;
pub mod sink;

pub use handle::TickerHandle;
pub use runner::{
    spinner_glyph, Ticker, TickerConfig, TickerExit, TickerReport, DEFAULT_DEADLINE,
    DEFAULT_SPIN_INTERVAL, DEFAULT_TICK,
};
pub use schedule::{Schedule, ScheduleEntry};
pub use sink::ProgressSink;
