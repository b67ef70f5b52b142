//! Structured logging setup for the `jfw-gen` binary.
//!
//! Log lines go to stderr so that generated output and reports on stdout stay
//! clean. The filter is taken from `RUST_LOG` when set, otherwise from
//! `JFW_GEN_LOG_LEVEL`, otherwise from `--verbose`.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => LogFormat::Compact, // Default to compact
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Include file:line location
    pub include_location: bool,
}

impl LogConfig {
    /// Read `JFW_GEN_LOG_*` variables; `verbose` applies when no level is set
    pub fn from_env(verbose: bool) -> Self {
        Self::from_lookup(verbose, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(verbose: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_level = if verbose { "debug" } else { "info" };
        Self {
            log_level: lookup("JFW_GEN_LOG_LEVEL").unwrap_or_else(|| default_level.to_string()),
            format: LogFormat::parse(
                &lookup("JFW_GEN_LOG_FORMAT").unwrap_or_else(|| "compact".to_string()),
            ),
            include_location: lookup("JFW_GEN_LOG_INCLUDE_LOCATION")
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

/// Install the global subscriber
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level().as_str()));

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}
