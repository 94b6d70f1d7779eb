/*!
 * Error types for the subscrub library.
 *
 * Library operations return typed errors defined here with thiserror;
 * the application layer (controller and CLI) works with anyhow, except
 * configuration validation which reports through `AppError`.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning raw cue text into a block
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockParseError {
    /// The cue does not start with a sequence number line
    #[error("Expected a sequence number, found: {line:?}")]
    MissingSequenceNumber {
        /// The offending line
        line: String,
    },

    /// The sequence number line is numeric but cannot be represented
    #[error("Invalid sequence number: {value:?}")]
    InvalidSequenceNumber {
        /// The raw sequence number text
        value: String,
    },

    /// The cue ends right after its sequence number
    #[error("Cue {seq_num} has no timecode line")]
    MissingTimecode {
        /// Sequence number of the incomplete cue
        seq_num: usize,
    },

    /// The timecode line is not of the form `start --> end`
    #[error("Invalid timecode line: {line:?}")]
    InvalidTimecode {
        /// The offending line
        line: String,
    },
}

/// Errors that can occur while loading a subtitle document
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The file could not be read from disk
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither UTF-8 nor Windows-1252 could decode the file
    #[error("Unable to decode {path:?} as UTF-8 or Windows-1252")]
    Decode {
        path: PathBuf,
    },

    /// A cue block inside the file is malformed
    #[error("Malformed cue in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: BlockParseError,
    },

    /// Segmentation produced no block with text
    #[error("File {} is empty.", .path.display())]
    EmptyContent {
        path: PathBuf,
    },

    /// The statistical detector could not produce a guess
    #[error("Language detection failed: {0}")]
    Detection(String),
}

impl SubtitleError {
    /// Path of the file the error belongs to, when known
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Read { path, .. }
            | Self::Decode { path }
            | Self::Parse { path, .. }
            | Self::EmptyContent { path } => Some(path),
            Self::Detection(_) => None,
        }
    }
}

/// Application-level errors with a typed boundary
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
