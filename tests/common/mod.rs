//! Common test utilities for boomipulse integration tests
//!
//! This module provides shared test infrastructure including:
//! - Mock Boomi listener setup using wiremock
//! - CLI invocation helpers driven over stdin
//! - Output assertion helpers

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;
use wiremock::ResponseTemplate;

pub const USER: &str = "boomi-user";
pub const PASSWORD: &str = "s3cret";

/// Exit status codes matching the Rust application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
    Interrupted = 130,
}

impl From<i32> for ExitStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => ExitStatus::Success,
            130 => ExitStatus::Interrupted,
            _ => ExitStatus::Error,
        }
    }
}

/// Result of running the CLI
#[derive(Debug)]
pub struct CliResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: ExitStatus,
    pub exit_code: i32,
}

impl CliResponse {
    /// Check if stdout contains a substring
    pub fn contains(&self, needle: &str) -> bool {
        self.stdout.contains(needle)
    }

    /// Count occurrences of a substring in stdout
    pub fn count(&self, needle: &str) -> usize {
        self.stdout.matches(needle).count()
    }
}

/// Isolated config dir, extra env vars and the stdin script
pub struct MockEnvironment {
    pub config_dir: TempDir,
    pub env_vars: HashMap<String, String>,
    pub stdin: Vec<u8>,
}

impl Default for MockEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnvironment {
    pub fn new() -> Self {
        let config_dir = TempDir::new().expect("Failed to create temp config dir");
        Self {
            config_dir,
            env_vars: HashMap::new(),
            stdin: Vec::new(),
        }
    }

    pub fn set_env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Lines typed by the operator, newline-terminated
    pub fn type_lines(&mut self, lines: &[&str]) -> &mut Self {
        for line in lines {
            self.stdin.extend_from_slice(line.as_bytes());
            self.stdin.push(b'\n');
        }
        self
    }

    /// Write `config.toml` into the isolated config dir
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.config_dir.path().join("config.toml");
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().to_path_buf()
    }
}

/// Run the binary with explicit credentials and a short retry delay
pub fn boomipulse(args: &[&str], env: &MockEnvironment) -> CliResponse {
    let mut full = vec!["--user", USER, "--password", PASSWORD, "--retry-delay", "10ms", "--timeout", "2s"];
    full.extend_from_slice(args);
    boomipulse_raw(&full, env)
}

/// Run the binary with exactly `args`
pub fn boomipulse_raw(args: &[&str], env: &MockEnvironment) -> CliResponse {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_boomipulse"));
    cmd.args(args);

    cmd.env("BOOMIPULSE_CONFIG_DIR", env.config_path());
    cmd.env_remove("BOOMIPULSE_USER");
    cmd.env_remove("BOOMIPULSE_PASSWORD");
    cmd.env_remove("RUST_LOG");
    for (key, value) in &env.env_vars {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::piped());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().expect("Failed to spawn command");
    {
        let mut stdin = child.stdin.take().expect("Failed to open stdin");
        stdin.write_all(&env.stdin).expect("Failed to write to stdin");
    }
    let output = child.wait_with_output().expect("Failed to wait for command");
    parse_output(output)
}

fn parse_output(output: Output) -> CliResponse {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(1);

    CliResponse {
        stdout,
        stderr,
        exit_status: ExitStatus::from(exit_code),
        exit_code,
    }
}

/// A listener reply whose timestamps are 2.5ms apart
pub fn boomi_reply() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "full_response_from_boomi": "Payload processed",
        "incoming_timestamp": "1700000000000000",
        "boomi_timestamp": "1700000000002500",
    }))
}

/// Strip ANSI color codes from a string
pub fn strip_colors(s: &str) -> String {
    let re = regex::Regex::new(r"\x1b\[[\d;]*m").unwrap();
    re.replace_all(s, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_colors() {
        let colored = "\x1b[38;5;71mGreen\x1b[0m";
        assert_eq!(strip_colors(colored), "Green");
    }

    #[test]
    fn test_exit_status_from_i32() {
        assert_eq!(ExitStatus::from(0), ExitStatus::Success);
        assert_eq!(ExitStatus::from(1), ExitStatus::Error);
        assert_eq!(ExitStatus::from(130), ExitStatus::Interrupted);
    }
}
