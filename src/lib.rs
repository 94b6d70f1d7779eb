/*!
 * # subscrub - subtitle advertisement scrubber
 *
 * A Rust library for cleaning SRT subtitle files of advertisement cues.
 *
 * ## Features
 *
 * - Segment SRT text into individually addressable blocks
 * - Decode UTF-8 files with a Windows-1252 fallback
 * - Determine the subtitle language from an override, the configuration,
 *   the file name or statistical detection
 * - Track confirmed ad blocks and suspected (warning) blocks
 * - Force deletion of blocks by position
 * - Renumber and serialize the surviving blocks
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitle`: Document model, segmentation, mark sets and serialization
 * - `sub_block`: Single cue parsing and classification state
 * - `language_resolver`: Language determination and validation
 * - `language_utils`: ISO language code registry
 * - `cleaner`: Removal of ad blocks from a classified document
 * - `file_utils`: File system operations and text decoding
 * - `app_config`: Configuration management
 * - `app_controller`: Batch processing of files and directories
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod cleaner;
pub mod errors;
pub mod file_utils;
pub mod language_resolver;
pub mod language_utils;
pub mod sub_block;
pub mod subtitle;

// Re-export main types for easier usage
pub use app_config::Config;
pub use sub_block::{Classification, SubBlock};
pub use subtitle::{BlockId, LoadOptions, Subtitle};
pub use language_resolver::{LanguageDetector, LanguageGuess, LanguageResolver, WhatlangDetector};
pub use language_utils::{IsoLanguageRegistry, LanguageRegistry};
pub use errors::{AppError, BlockParseError, SubtitleError};
