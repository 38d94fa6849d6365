//! CLI argument definitions for the `chronicle` binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Chronicle: classify activity posts, extract their details, and draw a
/// timeline.
#[derive(Parser, Debug)]
#[command(name = "chronicle", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Labeled training corpus (JSON). Defaults to the built-in sample.
    #[arg(long = "corpus")]
    pub corpus: Option<PathBuf>,

    /// Posts to process (JSON). Defaults to the built-in sample.
    #[arg(long = "posts")]
    pub posts: Option<PathBuf>,

    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Sort the timeline by date instead of keeping post order.
    #[arg(long = "chronological")]
    pub chronological: bool,

    /// Number of posts processed concurrently.
    #[arg(short = 'w', long = "workers")]
    pub workers: Option<usize>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

/// What the binary writes to stdout.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Character-art timeline.
    Text,
    /// Timeline entries as JSON.
    Json,
    /// Extracted records as JSON.
    Records,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > CHRONICLE_CONFIG env var > ~/.chronicle/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("CHRONICLE_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the worker count; never below 1.
    ///
    /// Priority: --workers flag > config file value.
    pub fn resolve_workers(&self, config_workers: usize) -> usize {
        self.workers.unwrap_or(config_workers).max(1)
    }

    /// Resolve whether the timeline is sorted by date.
    ///
    /// The flag can only switch sorting on.
    pub fn resolve_chronological(&self, config_chronological: bool) -> bool {
        self.chronological || config_chronological
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".chronicle").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".chronicle").join("config.toml");
    }
    PathBuf::from("config.toml")
}
