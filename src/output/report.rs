//! Report block printed after a successful cycle

use chrono::{DateTime, Local, TimeDelta};
use std::time::Duration;

use super::terminal::Palette;
use crate::session::CycleReport;

const RULE: &str = "-----------------------------";
const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Human-readable duration; negative deltas keep their sign
pub fn format_delta(delta: TimeDelta) -> String {
    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let magnitude = delta.abs().to_std().unwrap_or(Duration::ZERO);
    format!("{}{}", sign, format_duration(magnitude))
}

pub fn format_duration(duration: Duration) -> String {
    if duration.is_zero() {
        return "0s".to_string();
    }
    humantime::format_duration(duration).to_string()
}

fn format_stamp(stamp: Option<DateTime<Local>>) -> String {
    stamp
        .map(|t| t.format(STAMP_FORMAT).to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Lines of the report block, without trailing newlines
pub fn render_report(report: &CycleReport<'_>, palette: &Palette) -> Vec<String> {
    let timing = report.timing;
    let mut lines = vec![
        String::new(),
        format!(
            "Response Status: {} {}",
            palette.http_status(report.response.status, &report.response.status_line()),
            palette.flavor("[We have made contact!]")
        ),
        format!(
            "{} {}",
            palette.progress("Sent HTTP request and received response"),
            palette.flavor("[Final logics confirmed!]")
        ),
        format!(
            "This boomipulse run started at: {}",
            palette.value(&format_stamp(Some(timing.started_at)))
        ),
        format!(
            "Boomi received it at: {}",
            palette.value(&format_stamp(timing.server_processed_at()))
        ),
        format!(
            "Time taken between boomipulse creating it and Boomi responding to it: {}",
            palette.value(&format_delta(timing.transit))
        ),
        format!(
            "Time taken to initialize the script: {}",
            palette.value(&format_duration(report.init_elapsed))
        ),
        format!(
            "Script Processing Overhead: {}",
            palette.value(&format_delta(timing.local_overhead))
        ),
        format!(
            "Total execution time: {}",
            palette.value(&format_duration(timing.total_elapsed))
        ),
        String::new(),
        RULE.to_string(),
        format!("{} {}", palette.flavor("Current payload entered:"), report.payload),
        palette.flavor("Previous payloads:"),
    ];
    lines.extend(report.history.entries().iter().cloned());
    lines.push(RULE.to_string());
    lines
}
