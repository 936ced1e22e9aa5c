//! Configuration loading

#[allow(clippy::module_inception)]
mod config;

pub use config::{Config, DEFAULT_URL};
