use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use crate::errors::BlockParseError;

// @module: Single cue block and its classification state

// @const: SRT timecode line, tolerating '.' as millisecond separator and trailing cue settings
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d+):(\d{2}):(\d{2})[,.](\d{3})").unwrap()
});

/// Classification state written by the ad classifier or by a forced deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Classification {
    /// No classifier has scored the block yet, or it scored zero
    #[default]
    Unclassified,
    /// The classifier matched the block this many times
    Suspected(u32),
    /// Confirmed for deletion regardless of classifier opinion
    Confirmed,
}

impl Classification {
    /// Map a raw classifier score to a state. Zero means unclassified.
    pub fn from_score(score: u32) -> Self {
        match score {
            0 => Self::Unclassified,
            n => Self::Suspected(n),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

// @struct: One cue of a subtitle file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubBlock {
    // @field: Sequence number as written in the source file
    pub original_index: usize,

    // @field: Display index, reassigned on reindex
    pub current_index: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Cue text, trimmed
    content: String,

    // @field: Ad classification state
    pub classification: Classification,
}

impl SubBlock {
    /// Creates a block directly from its parts
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, content: &str) -> Self {
        SubBlock {
            original_index: seq_num,
            current_index: seq_num,
            start_time_ms,
            end_time_ms,
            content: content.trim().to_string(),
            classification: Classification::Unclassified,
        }
    }

    // @parses: Raw multi-line cue text into a block
    // @validates: Sequence number line followed by a timecode line
    pub fn parse(raw: &str) -> Result<Self, BlockParseError> {
        let mut lines = raw.lines().skip_while(|line| line.trim().is_empty());

        let seq_line = lines.next().map(str::trim).unwrap_or_default();
        if seq_line.is_empty() || !seq_line.chars().all(|c| c.is_ascii_digit()) {
            return Err(BlockParseError::MissingSequenceNumber {
                line: seq_line.to_string(),
            });
        }
        let seq_num: usize = seq_line.parse().map_err(|_| BlockParseError::InvalidSequenceNumber {
            value: seq_line.to_string(),
        })?;

        let timecode_line = lines.next().ok_or(BlockParseError::MissingTimecode { seq_num })?;
        let caps = TIMECODE_REGEX.captures(timecode_line).ok_or_else(|| BlockParseError::InvalidTimecode {
            line: timecode_line.to_string(),
        })?;
        let start_time_ms = Self::captures_to_ms(&caps, 1, timecode_line)?;
        let end_time_ms = Self::captures_to_ms(&caps, 5, timecode_line)?;

        let content = lines.collect::<Vec<_>>().join("\n");

        Ok(SubBlock::new(seq_num, start_time_ms, end_time_ms, &content))
    }

    /// Cue text without sequence number or timecode
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Set the raw score produced by the ad classifier.
    /// A forced deletion is never downgraded by a later score.
    pub fn set_score(&mut self, score: u32) {
        if !self.classification.is_confirmed() {
            self.classification = Classification::from_score(score);
        }
    }

    /// Force the block to be deleted whatever the classifier said
    pub fn confirm(&mut self) {
        self.classification = Classification::Confirmed;
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    fn captures_to_ms(caps: &regex::Captures, start_idx: usize, line: &str) -> Result<u64, BlockParseError> {
        let mut parts = [0u64; 4];
        for (offset, part) in parts.iter_mut().enumerate() {
            *part = caps
                .get(start_idx + offset)
                .and_then(|m| m.as_str().parse().ok())
                .ok_or_else(|| BlockParseError::InvalidTimecode { line: line.to_string() })?;
        }
        let [hours, minutes, seconds, millis] = parts;

        if minutes >= 60 || seconds >= 60 {
            return Err(BlockParseError::InvalidTimecode { line: line.to_string() });
        }

        hours
            .checked_mul(3600)
            .and_then(|total| total.checked_add(minutes * 60 + seconds))
            .and_then(|total| total.checked_mul(1000))
            .and_then(|total| total.checked_add(millis))
            .ok_or_else(|| BlockParseError::InvalidTimecode { line: line.to_string() })
    }
}

impl fmt::Display for SubBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{} --> {}",
            Self::format_timestamp(self.start_time_ms),
            Self::format_timestamp(self.end_time_ms)
        )?;
        write!(f, "{}", self.content)
    }
}
