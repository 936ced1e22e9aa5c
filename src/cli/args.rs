//! CLI argument definitions using clap

use clap::{ArgAction, Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// A string that redacts its value in Debug output to prevent credential leakage
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretString(pub String);

impl SecretString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "SecretString(\"\")")
        } else {
            write!(f, "SecretString(\"[REDACTED]\")")
        }
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString(s)
    }
}

impl std::str::FromStr for SecretString {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SecretString(s.to_string()))
    }
}

/// Log output format
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s).map_err(|e| format!("invalid duration `{}`: {}", s, e))
}

/// boomipulse - send a payload to a Boomi listener and time the round trip
#[derive(Parser, Debug, Clone)]
#[command(name = "boomipulse", version, about, long_about = None)]
pub struct Args {
    /// Listener URL (overrides the config file)
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    // =========================================================================
    // CREDENTIALS
    // =========================================================================

    /// Basic auth username (skips the env file and prompt)
    #[arg(short = 'u', long = "user", env = "BOOMIPULSE_USER", value_name = "USER")]
    pub user: Option<String>,

    /// Basic auth password
    #[arg(long = "password", env = "BOOMIPULSE_PASSWORD", value_name = "PASSWORD", hide_env_values = true)]
    pub password: Option<SecretString>,

    /// Env file holding USERNAME and PASSWORD
    #[arg(long = "env-file", value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    // =========================================================================
    // RETRY & TIMING
    // =========================================================================

    /// Total attempts per payload
    #[arg(long = "retries", value_name = "N")]
    pub retries: Option<u32>,

    /// Delay between attempts (e.g. 5s, 500ms)
    #[arg(long = "retry-delay", value_name = "DURATION", value_parser = parse_duration)]
    pub retry_delay: Option<Duration>,

    /// Ceiling on the progress display (e.g. 60s)
    #[arg(long = "deadline", value_name = "DURATION", value_parser = parse_duration)]
    pub deadline: Option<Duration>,

    /// Per-attempt transport timeout (e.g. 30s; 0s disables it)
    #[arg(long = "timeout", value_name = "DURATION", value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    // =========================================================================
    // OUTPUT
    // =========================================================================

    /// Echo request and response JSON
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Don't clear the screen between payloads
    #[arg(long = "no-clear", action = ArgAction::SetTrue)]
    pub no_clear: bool,

    /// Disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    pub no_color: bool,

    /// Log format for diagnostics on stderr
    #[arg(long = "log-format", value_name = "FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,

    // =========================================================================
    // TROUBLESHOOTING
    // =========================================================================

    /// Show traceback on error
    #[arg(long = "traceback", action = ArgAction::SetTrue)]
    pub traceback: bool,

    /// Debug mode (implies --traceback)
    #[arg(long = "debug", action = ArgAction::SetTrue)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_redacts() {
        let secret = SecretString::from("hunter2".to_string());
        assert_eq!(format!("{:?}", secret), "SecretString(\"[REDACTED]\")");
        assert_eq!(secret.as_str(), "hunter2");
        assert_eq!(format!("{:?}", SecretString::default()), "SecretString(\"\")");
    }

    #[test]
    fn test_parse_overrides() {
        let args = Args::try_parse_from([
            "boomipulse",
            "https://example.com/ws/simple/listener",
            "--retries",
            "5",
            "--retry-delay",
            "250ms",
            "--deadline",
            "2m",
            "--timeout",
            "1500ms",
        ])
        .unwrap();

        assert_eq!(args.url.as_deref(), Some("https://example.com/ws/simple/listener"));
        assert_eq!(args.retries, Some(5));
        assert_eq!(args.retry_delay, Some(Duration::from_millis(250)));
        assert_eq!(args.deadline, Some(Duration::from_secs(120)));
        assert_eq!(args.timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_invalid_duration_rejected() {
        let err = Args::try_parse_from(["boomipulse", "--retry-delay", "soon"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_zero_timeout_accepted() {
        let args = Args::try_parse_from(["boomipulse", "--timeout", "0s"]).unwrap();
        assert_eq!(args.timeout, Some(Duration::ZERO));
    }

    #[test]
    fn test_out_of_range_timeout_rejected() {
        for bad in ["1e20", "1.5", "-3s", "99999999999999999999999s"] {
            let err = Args::try_parse_from(["boomipulse", "--timeout", bad]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "{}", bad);
        }
    }
}
