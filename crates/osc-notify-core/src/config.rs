//! Configuration for osc-notify (`osc-notify.toml`).
//!
//! ```toml
//! [parser]
//! buffer_capacity = 2048
//! identifier_capacity = 64
//! sink_capacity = 4096
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logging::LogConfig;
use crate::metadata::DEFAULT_IDENTIFIER_CAPACITY;
use crate::session::DEFAULT_BUFFER_CAPACITY;
use crate::sink::DEFAULT_SINK_CAPACITY;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown log format: {s}. Expected one of: pretty, json")),
        }
    }
}

/// Upper bound for every configured capacity (16 MiB).
pub const MAX_CAPACITY: usize = 16 * 1024 * 1024;

/// Buffer sizing for a parser instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Capacity of each of the title and body buffers, in bytes.
    /// Appends that would reach this size are refused.
    pub buffer_capacity: usize,

    /// Longest identifier accepted for session matching, in bytes
    pub identifier_capacity: usize,

    /// Capacity of the scratch buffer the tokenizer fills, sentinel included
    pub sink_capacity: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            identifier_capacity: DEFAULT_IDENTIFIER_CAPACITY,
            sink_capacity: DEFAULT_SINK_CAPACITY,
        }
    }
}

impl ParserConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_capacity < 2 {
            return Err(ConfigError::ValidationError(
                "parser.buffer_capacity must be at least 2".to_string(),
            ));
        }
        for (name, value) in [
            ("buffer_capacity", self.buffer_capacity),
            ("identifier_capacity", self.identifier_capacity),
            ("sink_capacity", self.sink_capacity),
        ] {
            if value > MAX_CAPACITY {
                return Err(ConfigError::ValidationError(format!(
                    "parser.{name} ({value}) must not exceed {MAX_CAPACITY}"
                )));
            }
        }
        if self.identifier_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "parser.identifier_capacity must be greater than 0".to_string(),
            ));
        }
        if self.identifier_capacity > self.buffer_capacity {
            return Err(ConfigError::ValidationError(format!(
                "parser.identifier_capacity ({}) must not exceed parser.buffer_capacity ({})",
                self.identifier_capacity, self.buffer_capacity
            )));
        }
        if self.sink_capacity < 2 {
            return Err(ConfigError::ValidationError(
                "parser.sink_capacity must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserConfig,
    pub logging: LogConfig,
}

impl Config {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFailed(path.display().to_string(), e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate config text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parser.validate()?;
        self.logging
            .level
            .parse::<crate::logging::LogLevel>()
            .map_err(ConfigError::ValidationError)?;
        Ok(())
    }
}
