//! Logging configuration
//!
//! Declares which providers are enabled and at which levels. A section whose
//! level set ends up empty means that provider is disabled, not an error.
//! Defaults enable Info/Warning/Error and leave Debug/Trace off.

use crate::core::error::{LoggerError, Result};
use crate::core::level::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-provider level switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub trace: bool,
    pub debug: bool,
    pub info: bool,
    pub warning: bool,
    pub error: bool,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            trace: false,
            debug: false,
            info: true,
            warning: true,
            error: true,
        }
    }
}

impl ProviderSettings {
    /// All levels disabled; the provider will not be instantiated.
    pub fn disabled() -> Self {
        Self {
            trace: false,
            debug: false,
            info: false,
            warning: false,
            error: false,
        }
    }

    pub fn enabled_levels(&self) -> Vec<LogLevel> {
        let switches = [
            (self.trace, LogLevel::Trace),
            (self.debug, LogLevel::Debug),
            (self.info, LogLevel::Info),
            (self.warning, LogLevel::Warning),
            (self.error, LogLevel::Error),
        ];
        switches
            .into_iter()
            .filter_map(|(on, level)| on.then_some(level))
            .collect()
    }
}

/// File provider settings: level switches plus output location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderSettings {
    #[serde(flatten)]
    pub levels: ProviderSettings,
    /// Output directory; defaults to the running executable's directory.
    pub log_path: Option<PathBuf>,
    /// File-name prefix; defaults to the executable's base name plus `-`.
    pub file_prefix: Option<String>,
}

impl FileProviderSettings {
    pub fn resolved_log_path(&self) -> PathBuf {
        self.log_path.clone().unwrap_or_else(executable_directory)
    }

    pub fn resolved_prefix(&self) -> String {
        self.file_prefix
            .clone()
            .unwrap_or_else(|| format!("{}-", executable_stem()))
    }
}

fn executable_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn executable_stem() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "log".to_string())
}

/// Top-level logging configuration with one section per provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub console: ProviderSettings,
    #[serde(rename = "eventFiring")]
    pub event_firing: ProviderSettings,
    #[serde(rename = "fileWriting")]
    pub file_writing: FileProviderSettings,
}

impl LoggingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            LoggerError::config("LoggingConfig", format!("invalid JSON: {}", e))
        })
    }
}
