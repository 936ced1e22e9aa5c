//! Config file handling
//!
//! `config.toml` lives in `$BOOMIPULSE_CONFIG_DIR`, or `boomipulse/` under the
//! platform config directory. Every key is optional; CLI flags win over the
//! file and the file wins over built-in defaults.

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::cli::Args;
use crate::errors::{BoomipulseError, Result};
use crate::retry::{RetryPolicy, DEFAULT_RETRY_DELAY, DEFAULT_RETRY_LIMIT};
use crate::ticker::{TickerConfig, DEFAULT_DEADLINE};

pub const DEFAULT_URL: &str =
    "https://c01-usa-east.integrate.boomi.com/ws/simple/createGeneralListener";

const CONFIG_DIR_ENV: &str = "BOOMIPULSE_CONFIG_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub config_dir: PathBuf,
    pub url: String,
    pub timeout: Option<Duration>,
    pub retry_limit: u32,
    pub retry_delay: Duration,
    pub deadline: Duration,
    pub env_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: Self::default_config_dir(),
            url: DEFAULT_URL.to_string(),
            timeout: None,
            retry_limit: DEFAULT_RETRY_LIMIT,
            retry_delay: DEFAULT_RETRY_DELAY,
            deadline: DEFAULT_DEADLINE,
            env_file: PathBuf::from(".env"),
        }
    }
}

impl Config {
    /// Load `config.toml`; a missing file yields the defaults
    pub fn load() -> Result<Self> {
        let config_dir = Self::default_config_dir();
        let config_file = config_dir.join("config.toml");

        if !config_file.exists() {
            return Ok(Self {
                config_dir,
                ..Self::default()
            });
        }

        let content = std::fs::read_to_string(&config_file)
            .map_err(|e| BoomipulseError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&content, config_dir)
    }

    pub fn parse(content: &str, config_dir: PathBuf) -> Result<Self> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| BoomipulseError::Config(format!("Invalid config TOML: {}", e)))?;
        let defaults = Self::default();

        let url = get_str(&toml_value, "endpoint", "url")
            .map(String::from)
            .unwrap_or(defaults.url);
        let timeout = get_duration(&toml_value, "endpoint", "timeout")?.filter(|t| !t.is_zero());

        let retry_limit = match toml_value.get("retry").and_then(|r| r.get("limit")) {
            Some(v) => v
                .as_integer()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| BoomipulseError::Config("retry.limit must be a non-negative integer".into()))?,
            None => defaults.retry_limit,
        };
        let retry_delay = get_duration(&toml_value, "retry", "delay")?.unwrap_or(defaults.retry_delay);
        let deadline = get_duration(&toml_value, "ticker", "deadline")?.unwrap_or(defaults.deadline);

        // Relative env file paths are resolved against the working directory,
        // same as the default `.env`
        let env_file = get_str(&toml_value, "credentials", "env_file")
            .map(PathBuf::from)
            .unwrap_or(defaults.env_file);

        Ok(Self {
            config_dir,
            url,
            timeout,
            retry_limit,
            retry_delay,
            deadline,
            env_file,
        })
    }

    /// Apply command-line overrides
    pub fn merge_args(mut self, args: &Args) -> Self {
        if let Some(url) = &args.url {
            self.url = url.clone();
        }
        if let Some(timeout) = args.timeout {
            // 0s clears a configured timeout
            self.timeout = (!timeout.is_zero()).then_some(timeout);
        }
        if let Some(retries) = args.retries {
            self.retry_limit = retries;
        }
        if let Some(delay) = args.retry_delay {
            self.retry_delay = delay;
        }
        if let Some(deadline) = args.deadline {
            self.deadline = deadline;
        }
        if let Some(env_file) = &args.env_file {
            self.env_file = env_file.clone();
        }
        self
    }

    pub fn endpoint(&self) -> Result<Url> {
        let url = Url::parse(&self.url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(BoomipulseError::Argument(format!(
                "Unsupported URL scheme `{}` (expected http or https)",
                other
            ))),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_limit, self.retry_delay)
    }

    pub fn ticker_config(&self) -> TickerConfig {
        TickerConfig {
            deadline: self.deadline,
            ..TickerConfig::default()
        }
    }

    fn default_config_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .map(|p| p.join("boomipulse"))
            .unwrap_or_else(|| PathBuf::from(".boomipulse"))
    }
}

fn get_str<'a>(toml: &'a toml::Value, section: &str, key: &str) -> Option<&'a str> {
    toml.get(section).and_then(|s| s.get(key)).and_then(|v| v.as_str())
}

fn get_duration(toml: &toml::Value, section: &str, key: &str) -> Result<Option<Duration>> {
    let Some(raw) = toml.get(section).and_then(|s| s.get(key)) else {
        return Ok(None);
    };
    let text = raw.as_str().ok_or_else(|| {
        BoomipulseError::Config(format!("{}.{} must be a duration string like \"5s\"", section, key))
    })?;
    humantime::parse_duration(text)
        .map(Some)
        .map_err(|e| BoomipulseError::Config(format!("{}.{}: {}", section, key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = Config::parse("", PathBuf::from("/tmp")).unwrap();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert_eq!(config.ticker_config(), TickerConfig::default());
        assert_eq!(config.env_file, PathBuf::from(".env"));
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_parse_full() {
        let config = Config::parse(
            r#"
[endpoint]
url = "http://localhost:9090/ws/simple/listener"
timeout = "30s"

[retry]
limit = 5
delay = "250ms"

[ticker]
deadline = "90s"

[credentials]
env_file = "/etc/boomipulse/boomi.env"
"#,
            PathBuf::from("/tmp"),
        )
        .unwrap();

        assert_eq!(config.url, "http://localhost:9090/ws/simple/listener");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.retry_policy(), RetryPolicy::new(5, Duration::from_millis(250)));
        assert_eq!(config.deadline, Duration::from_secs(90));
        assert_eq!(config.env_file, PathBuf::from("/etc/boomipulse/boomi.env"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::parse("[retry]\nlimit = -1", PathBuf::new()).is_err());
        assert!(Config::parse("[retry]\ndelay = 5", PathBuf::new()).is_err());
        assert!(Config::parse("[ticker]\ndeadline = \"forever\"", PathBuf::new()).is_err());
        assert!(Config::parse("not = [valid", PathBuf::new()).is_err());
    }

    #[test]
    fn test_args_override_file() {
        let config = Config::parse("[retry]\nlimit = 5\ndelay = \"1s\"", PathBuf::new()).unwrap();
        let args = Args::try_parse_from([
            "boomipulse",
            "http://127.0.0.1:1/listener",
            "--retries",
            "2",
            "--env-file",
            "creds.env",
        ])
        .unwrap();

        let config = config.merge_args(&args);
        assert_eq!(config.url, "http://127.0.0.1:1/listener");
        assert_eq!(config.retry_limit, 2);
        assert_eq!(config.retry_delay, Duration::from_secs(1));
        assert_eq!(config.env_file, PathBuf::from("creds.env"));
    }

    #[test]
    fn test_timeout_override() {
        let config = || Config::parse("[endpoint]\ntimeout = \"30s\"", PathBuf::new()).unwrap();
        let args = |t: &str| Args::try_parse_from(["boomipulse", "--timeout", t]).unwrap();

        assert_eq!(config().merge_args(&args("2s")).timeout, Some(Duration::from_secs(2)));
        assert_eq!(config().merge_args(&args("0s")).timeout, None);

        let zero = Config::parse("[endpoint]\ntimeout = \"0s\"", PathBuf::new()).unwrap();
        assert_eq!(zero.timeout, None);
    }

    #[test]
    fn test_endpoint_scheme() {
        let mut config = Config::default();
        assert!(config.endpoint().is_ok());

        config.url = "ftp://example.com/".to_string();
        assert!(matches!(config.endpoint(), Err(BoomipulseError::Argument(_))));

        config.url = "not a url".to_string();
        assert!(matches!(config.endpoint(), Err(BoomipulseError::UrlParse(_))));
    }
}
