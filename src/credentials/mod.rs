//! Basic-auth credentials for the listener
//!
//! Resolution order: explicit `--user`/`--password`, then the env file
//! (`USERNAME`/`PASSWORD`, falling back to the process environment for keys
//! the file lacks), then an interactive prompt when the env file can't be read.

pub mod dotenv;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::cli::SecretString;
use crate::errors::{BoomipulseError, Result};
pub use dotenv::EnvFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

/// Supplies credentials once per request cycle
pub trait CredentialSource {
    fn acquire(&mut self) -> Result<Credentials>;
}

impl CredentialSource for Credentials {
    fn acquire(&mut self) -> Result<Credentials> {
        Ok(self.clone())
    }
}

/// Flags, then env file, then prompt
#[derive(Debug, Clone)]
pub struct CredentialChain {
    user: Option<String>,
    password: Option<SecretString>,
    env_file: PathBuf,
    stdin_isatty: bool,
}

impl CredentialChain {
    pub fn new(
        user: Option<String>,
        password: Option<SecretString>,
        env_file: PathBuf,
        stdin_isatty: bool,
    ) -> Self {
        Self {
            user,
            password,
            env_file,
            stdin_isatty,
        }
    }

    fn from_env_file(&self, file: &EnvFile) -> Result<Credentials> {
        let username = self
            .user
            .clone()
            .or_else(|| file.get_or_env("USERNAME"))
            .ok_or_else(|| missing_key(&self.env_file, "USERNAME"))?;
        let password = self
            .password
            .clone()
            .or_else(|| file.get_or_env("PASSWORD").map(SecretString::from))
            .ok_or_else(|| missing_key(&self.env_file, "PASSWORD"))?;

        Ok(Credentials::new(username, password))
    }

    fn prompt(&self) -> Result<Credentials> {
        let username = match &self.user {
            Some(user) => user.clone(),
            None => prompt_line(&format!(
                "Unable to load {}. Please enter your username: ",
                self.env_file.display()
            ))?,
        };
        let password = match &self.password {
            Some(password) => password.clone(),
            None if self.stdin_isatty => {
                print!("Please enter your password: ");
                io::stdout().flush()?;
                rpassword::read_password()
                    .map(SecretString::from)
                    .map_err(|e| BoomipulseError::Auth(format!("Failed to read password: {}", e)))?
            }
            None => SecretString::from(prompt_line("Please enter your password: ")?),
        };

        Ok(Credentials::new(username, password))
    }
}

impl CredentialSource for CredentialChain {
    fn acquire(&mut self) -> Result<Credentials> {
        if let (Some(user), Some(password)) = (&self.user, &self.password) {
            return Ok(Credentials::new(user.clone(), password.clone()));
        }

        match EnvFile::load(&self.env_file) {
            Ok(file) => {
                info!(path = %self.env_file.display(), "Loaded env file");
                self.from_env_file(&file)
            }
            Err(e) => {
                debug!(error = %e, "Env file unavailable, prompting for credentials");
                let credentials = self.prompt()?;
                info!("Using entered credentials");
                Ok(credentials)
            }
        }
    }
}

fn missing_key(path: &std::path::Path, key: &str) -> BoomipulseError {
    BoomipulseError::Auth(format!("{} is not set in {} or the environment", key, path.display()))
}

/// Print a prompt and read one line from stdin, without its line ending
pub fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(BoomipulseError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed",
        )));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
