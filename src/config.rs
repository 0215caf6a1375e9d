//! Configuration for addon-sigview.
//!
//! Provides centralized configuration with sensible defaults. Every section
//! is `#[serde(default)]`, so a configuration file only needs to name the
//! values it changes.

use crate::error::{Result, SigviewError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Master configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigviewConfig {
    /// I/O limits for reading package bytes.
    pub io: IOConfig,
    /// Load controller configuration.
    pub load: LoadConfig,
    /// Output configuration for the rendering sink.
    pub output: OutputConfig,
}

impl SigviewConfig {
    /// Parse a configuration from a JSON document.
    pub fn from_json_str(json_str: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json_str)
            .map_err(|e| SigviewError::Config(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SigviewError::Serialization(format!("JSON serialization error: {}", e)))
    }

    /// Reject values that would make every load fail.
    pub fn validate(&self) -> Result<()> {
        if self.io.max_file_size == 0 {
            return Err(SigviewError::Config(
                "io.max_file_size must be greater than zero".to_string(),
            ));
        }
        if self.load.read_timeout_seconds == 0 {
            return Err(SigviewError::Config(
                "load.read_timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// I/O configuration for reading package bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IOConfig {
    /// Largest file accepted by the byte source (default: 200 MiB).
    pub max_file_size: u64,
}

impl Default for IOConfig {
    fn default() -> Self {
        Self {
            max_file_size: 200 * 1024 * 1024,
        }
    }
}

/// Load controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Upper bound on a single byte read (default: 30).
    pub read_timeout_seconds: u64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            read_timeout_seconds: crate::timeout::DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// How rendered output is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markup stripped to plain text.
    #[default]
    Text,
    /// Markup preserved as escaped HTML.
    Html,
    /// The full display model as JSON.
    Json,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Append the raw inspector dump after the summary.
    pub show_raw: bool,
    /// Emit logs as JSON lines.
    pub json_logs: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_raw: true,
            json_logs: false,
        }
    }
}
