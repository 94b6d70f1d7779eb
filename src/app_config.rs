use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use crate::errors::AppError;
use crate::language_utils::{IsoLanguageRegistry, LanguageRegistry};

/// Application configuration module
/// This module handles loading and validating the configuration file.
/// Settings given on the command line take precedence over it.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Language assigned to every file instead of detecting one
    #[serde(default)]
    pub default_language: Option<String>,

    /// Base directory used to shorten paths in log output
    #[serde(default)]
    pub relative_base: Option<PathBuf>,

    /// Language detection thresholds
    #[serde(default)]
    pub language_detection: LanguageDetectionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Thresholds used when detecting or validating a document language
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LanguageDetectionConfig {
    /// Below this many characters of cue text no detection is attempted
    #[serde(default = "default_min_content_chars")]
    pub min_content_chars: usize,

    /// Probability the top guess must exceed to be adopted as the language
    #[serde(default = "default_detect_threshold")]
    pub detect_threshold: f64,

    /// Probability the top guess must exceed to confirm a stated language
    #[serde(default = "default_validate_threshold")]
    pub validate_threshold: f64,
}

impl Default for LanguageDetectionConfig {
    fn default() -> Self {
        Self {
            min_content_chars: default_min_content_chars(),
            detect_threshold: default_detect_threshold(),
            validate_threshold: default_validate_threshold(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_min_content_chars() -> usize {
    500
}

fn default_detect_threshold() -> f64 {
    0.9
}

fn default_validate_threshold() -> f64 {
    0.8
}

impl Config {
    /// Load the configuration from a JSON file, or defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let config: Config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(language) = &self.default_language {
            if !IsoLanguageRegistry.is_language(language) {
                return Err(AppError::Config(format!("Unknown default language: {}", language)));
            }
        }

        let detection = &self.language_detection;
        for (name, value) in [
            ("detect_threshold", detection.detect_threshold),
            ("validate_threshold", detection.validate_threshold),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(AppError::Config(format!("{} must be in (0, 1], got {}", name, value)));
            }
        }

        Ok(())
    }
}
