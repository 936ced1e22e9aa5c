//! Minimal `.env` reader for the credential file
//!
//! Accepts `KEY=value`, `export KEY=value`, single- and double-quoted values,
//! full-line comments, and ` #` inline comments on unquoted values. An
//! unquoted `#` with no preceding space stays part of the value, since
//! passwords often contain one.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::{BoomipulseError, Result};

#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    vars: HashMap<String, String>,
}

impl EnvFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BoomipulseError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut vars = HashMap::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = parse_line(line).ok_or_else(|| {
                BoomipulseError::Config(format!(
                    "Invalid .env syntax at line {}",
                    line_num + 1
                ))
            })?;
            vars.insert(key, value);
        }

        Ok(Self { vars })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// File value first, then the process environment
    pub fn get_or_env(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(str::to_string)
            .or_else(|| std::env::var(key).ok())
    }
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, raw) = line.split_once('=')?;
    let key = key.trim();

    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }

    let raw = raw.trim();
    let value = if let Some(inner) = strip_quotes(raw, '"') {
        unescape_double_quoted(inner)
    } else if let Some(inner) = strip_quotes(raw, '\'') {
        inner.to_string()
    } else {
        match raw.find(" #") {
            Some(pos) => raw[..pos].trim_end().to_string(),
            None => raw.to_string(),
        }
    };

    Some((key.to_string(), value))
}

fn strip_quotes(s: &str, quote: char) -> Option<&str> {
    s.strip_prefix(quote)?.strip_suffix(quote)
}

fn unescape_double_quoted(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}
