//! Configuration management for apkscan
//!
//! Settings are loaded from environment variables with defaults; command-line
//! flags override them.
//!
//! # Environment Variables
//!
//! - `APKSCAN_EXTENSION`: disassembly file extension - default: "smali"
//! - `APKSCAN_SORTED`: visit directory entries in name order (true|false) - default: "false"
//! - `APKSCAN_APKTOOL`: path to the apktool executable or apktool.jar - default: looked up on PATH
//! - `APKSCAN_LOG_LEVEL`: logging level - default: "info"

use crate::analyzer::AnalyzerConfig;
use crate::collector::{TraversalOrder, DEFAULT_EXTENSION};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApkscanConfig {
    /// Extension (without the dot) of the files to scan
    pub extension: String,

    /// Visit directory entries sorted by name instead of listing order
    pub sorted: bool,

    /// apktool executable or JAR; `None` means search PATH
    pub apktool_path: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl ApkscanConfig {
    /// Defaults without consulting the environment
    pub fn builtin() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            sorted: false,
            apktool_path: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::builtin();

        let extension = env::var("APKSCAN_EXTENSION").unwrap_or(defaults.extension);

        let sorted = match env::var("APKSCAN_SORTED") {
            Ok(value) => value
                .trim()
                .to_lowercase()
                .parse::<bool>()
                .map_err(|e| ConfigError::ParseError {
                    field: "APKSCAN_SORTED".to_string(),
                    error: e.to_string(),
                })?,
            Err(_) => defaults.sorted,
        };

        let apktool_path = env::var("APKSCAN_APKTOOL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let log_level = env::var("APKSCAN_LOG_LEVEL")
            .unwrap_or(defaults.log_level)
            .to_lowercase();

        Ok(Self {
            extension,
            sorted,
            apktool_path,
            log_level,
        })
    }

    /// Checks that:
    /// - the extension is non-empty and has no leading dot or path separator
    /// - the log level is one of trace, debug, info, warn, error
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "extension cannot be empty".to_string(),
            ));
        }
        if self.extension.starts_with('.') || self.extension.contains(['/', '\\']) {
            return Err(ConfigError::ValidationFailed(format!(
                "extension must be a bare suffix like 'smali', got '{}'",
                self.extension
            )));
        }
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::ValidationFailed(format!(
                "invalid log level '{}'. Valid levels: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    pub fn traversal_order(&self) -> TraversalOrder {
        if self.sorted {
            TraversalOrder::Sorted
        } else {
            TraversalOrder::Listing
        }
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            extension: self.extension.clone(),
            order: self.traversal_order(),
        }
    }
}
