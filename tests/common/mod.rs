/*!
 * Common test utilities for the subscrub test suite
 */

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;
use subscrub::{LanguageDetector, LanguageGuess, SubtitleError};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// SRT text with one cue per given line of text, separated by blank lines
pub fn srt_with_cues(texts: &[&str]) -> String {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            format!(
                "{}\n00:00:{:02},000 --> 00:00:{:02},500\n{}\n\n",
                i + 1,
                i,
                i,
                text
            )
        })
        .collect()
}

/// Sample subtitle with three cues; the last cue is never emitted
pub const SAMPLE_SRT: &str = "1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
";

/// English prose long enough for language detection
pub fn long_english_text() -> String {
    "The quick brown fox jumps over the lazy dog while the children watch from the garden. "
        .repeat(8)
}

/// Detector returning a fixed answer and counting its invocations
pub struct StubDetector {
    guesses: Vec<LanguageGuess>,
    calls: Cell<usize>,
}

impl StubDetector {
    pub fn new(lang: &str, prob: f64) -> Self {
        Self {
            guesses: vec![LanguageGuess { lang: lang.to_string(), prob }],
            calls: Cell::new(0),
        }
    }

    /// A detector that never finds anything
    pub fn silent() -> Self {
        Self {
            guesses: Vec::new(),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl LanguageDetector for StubDetector {
    fn detect_langs(&self, _text: &str) -> Result<Vec<LanguageGuess>, SubtitleError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.guesses.clone())
    }
}
