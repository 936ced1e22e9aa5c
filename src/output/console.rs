//! Interactive terminal: prompts, the ticker's progress lines and the report

use chrono::Local;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

use super::report::render_report;
use super::terminal::Palette;
use crate::context::Environment;
use crate::credentials::prompt_line;
use crate::errors::{BoomipulseError, Result};
use crate::retry::RetryEvent;
use crate::session::{Console, CycleReport};
use crate::ticker::{ProgressSink, ScheduleEntry};

const LINE_STAMP: &str = "%Y/%m/%d %H:%M:%S";
const DASHES: &str = "-----------------------------";

/// The [`Console`] used by the binary
#[derive(Debug, Clone)]
pub struct TerminalConsole {
    palette: Palette,
    clear_screen: bool,
    verbose: bool,
    /// The current cycle's spinner line, shared with its [`ConsoleSink`]
    spinner: Option<ProgressBar>,
}

impl TerminalConsole {
    pub fn new(env: &Environment) -> Self {
        Self {
            palette: Palette::new(env.colors),
            clear_screen: env.stdout_isatty,
            verbose: false,
            spinner: None,
        }
    }

    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = self.clear_screen && clear;
        self
    }

    /// Echo request bodies and raw responses
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn stamped(&self, message: &str, flavor: &str) -> String {
        format!(
            "{} {} {}",
            Local::now().format(LINE_STAMP),
            self.palette.progress(message),
            self.palette.flavor(&format!("[{}]", flavor))
        )
    }

    fn emit(&self, line: &str) {
        match &self.spinner {
            Some(pb) => print_above(pb, line),
            None => println!("{}", line),
        }
    }
}

/// Print a full line, moving the spinner out of the way while it is drawn
fn print_above(pb: &ProgressBar, line: &str) {
    pb.suspend(|| println!("{}", line));
}

impl Console for TerminalConsole {
    fn begin_cycle(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        if self.clear_screen {
            crossterm::execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        writeln!(stdout, "{}", self.stamped("Program started", "Ignition sequence initiated."))?;
        Ok(())
    }

    fn read_payload(&mut self) -> Result<String> {
        prompt_line("Enter the payload to send to Boomi: ")
    }

    fn read_continue(&mut self) -> Result<String> {
        match prompt_line("Again (Y/N): ") {
            Ok(answer) => Ok(answer),
            Err(BoomipulseError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                println!();
                Ok(String::new())
            }
            Err(e) => Err(e),
        }
    }

    fn progress_sink(&mut self) -> Box<dyn ProgressSink> {
        let sink = ConsoleSink::new(self.palette);
        self.spinner = Some(sink.spinner.clone());
        Box::new(sink)
    }

    fn request_event(&mut self, event: &RetryEvent<'_>, body: &str) {
        match event {
            RetryEvent::Attempt { .. } => {
                self.emit(&self.stamped("Sending HTTP request to Boomi API", "Sending launch status..."));
                if self.verbose {
                    let dashes = self.palette.muted(DASHES);
                    self.emit(&format!("{}\n{}\n{}", dashes, body, dashes));
                }
            }
            RetryEvent::Retrying {
                attempt,
                limit,
                failure,
                delay,
            } => {
                self.emit(&format!(
                    "{} {}",
                    self.palette
                        .warning(&format!("Retry - Attempt {} of {}...", attempt, limit)),
                    self.palette.muted(&format!(
                        "({}; waiting {})",
                        failure,
                        humantime::format_duration(*delay)
                    ))
                ));
            }
        }
    }

    fn report(&mut self, report: &CycleReport<'_>) -> Result<()> {
        let mut stdout = io::stdout().lock();
        for line in render_report(report, &self.palette) {
            writeln!(stdout, "{}", line)?;
        }
        if self.verbose {
            writeln!(stdout, "{}", self.palette.muted("Raw response:"))?;
            writeln!(stdout, "{}", report.response.body)?;
        }
        stdout.flush()?;
        Ok(())
    }
}

/// Ticker output on stdout. The spinner is an indicatif bar that stays
/// hidden until the first spin; every other line is printed above it.
pub struct ConsoleSink {
    palette: Palette,
    spinner: ProgressBar,
    shown: bool,
}

impl ConsoleSink {
    pub fn new(palette: Palette) -> Self {
        let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden());
        let style = ProgressStyle::with_template("{msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        Self {
            palette,
            spinner,
            shown: false,
        }
    }
}

impl ProgressSink for ConsoleSink {
    fn entry(&mut self, _index: usize, entry: &ScheduleEntry, _flushed: bool) {
        let line = format!(
            "{} {} {}",
            Local::now().format(LINE_STAMP),
            self.palette.progress(&entry.message),
            self.palette.flavor(&format!("{}...", entry.flavor))
        );
        print_above(&self.spinner, &line);
    }

    fn spin(&mut self, elapsed: Duration, glyph: char) {
        let palette = self.palette;
        let message = format!(
            "{} {} {}",
            Local::now().format(LINE_STAMP),
            palette.progress("Reworking a few more things, one moment:"),
            palette.number(&format!("{:.5}s {}", elapsed.as_secs_f64(), glyph))
        );
        self.spinner.set_message(message);
        if !self.shown {
            self.spinner.set_draw_target(ProgressDrawTarget::stdout());
            self.shown = true;
        }
    }

    fn timed_out(&mut self, deadline: Duration) {
        let line = self.palette.warning(&format!(
            "Boomi Response timer timed out after {} seconds.",
            deadline.as_secs()
        ));
        print_above(&self.spinner, &line);
    }

    fn finish(&mut self) {
        if self.shown {
            self.spinner.finish();
            self.spinner.set_draw_target(ProgressDrawTarget::hidden());
            self.shown = false;
            println!();
        }
    }
}
