use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use regex::Regex;
use once_cell::sync::Lazy;
use log::{debug, warn};
use crate::errors::{BlockParseError, SubtitleError};
use crate::file_utils::FileManager;
use crate::language_resolver::LanguageResolver;
use crate::sub_block::SubBlock;

// @module: Subtitle document, segmentation and ad/warning bookkeeping

// @const: Blank separator lines between cues
static BLANK_LINES_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n").unwrap()
});

/// Identity of a block inside the document that owns it.
///
/// Ids are handed out by [`Subtitle::blocks`] and stay valid for the lifetime
/// of the document, since the block sequence is never reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(usize);

impl BlockId {
    /// 1-based position of the block in the parsed sequence
    pub fn position(&self) -> usize {
        self.0 + 1
    }
}

/// Per-document settings supplied by the caller
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Language to use verbatim, skipping determination
    pub language: Option<String>,
    /// Language to use when no override is given
    pub default_language: Option<String>,
    /// Base directory for the shortened display path
    pub relative_base: Option<PathBuf>,
    /// 1-based block positions to delete regardless of classification
    pub destroy_list: Vec<usize>,
}

/// Split raw subtitle text into blocks.
///
/// A block starts at a sequence number line directly followed by a line
/// containing `-->`. Blocks are emitted when the next block start is seen,
/// so the cue after the last detected start is never emitted. Blocks without
/// text are skipped.
pub fn segment(content: &str) -> Result<Vec<SubBlock>, BlockParseError> {
    let normalized = normalize(content);
    let lines: Vec<&str> = normalized.split('\n').collect();

    let mut blocks = Vec::new();
    let mut last_break = 0;
    for i in 2..lines.len() {
        if lines[i].contains("-->") && is_sequence_number(lines[i - 1]) {
            let block = SubBlock::parse(&lines[last_break..i - 1].join("\n"))?;
            last_break = i - 1;
            if !block.content().trim().is_empty() {
                blocks.push(block);
            }
        }
    }

    Ok(blocks)
}

fn normalize(content: &str) -> String {
    let content = content.replace("\r\n", "\n");
    BLANK_LINES_REGEX
        .replace_all(&content, "\n")
        .replace('\u{2014}', "--")
}

fn is_sequence_number(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c.is_ascii_digit())
}

/// A parsed subtitle file with its ad and warning marks
#[derive(Debug)]
pub struct Subtitle {
    blocks: Vec<SubBlock>,
    ad_blocks: BTreeSet<BlockId>,
    warning_blocks: BTreeSet<BlockId>,
    language: String,
    language_mismatch: bool,
    file: PathBuf,
    short_path: PathBuf,
}

impl Subtitle {
    /// Read, decode and parse a subtitle file
    pub fn load<P: AsRef<Path>>(
        path: P,
        options: &LoadOptions,
        resolver: &LanguageResolver,
    ) -> Result<Self, SubtitleError> {
        let path = path.as_ref();
        let content = FileManager::read_subtitle_text(path)?;
        Self::from_content(&content, path, options, resolver)
    }

    /// Build a document from already decoded text
    pub fn from_content<P: AsRef<Path>>(
        content: &str,
        path: P,
        options: &LoadOptions,
        resolver: &LanguageResolver,
    ) -> Result<Self, SubtitleError> {
        let file = path.as_ref().to_path_buf();
        let blocks = segment(content).map_err(|source| SubtitleError::Parse {
            path: file.clone(),
            source,
        })?;

        let short_path = options
            .relative_base
            .as_ref()
            .and_then(|base| file.strip_prefix(base).ok())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| file.clone());

        if blocks.is_empty() {
            return Err(SubtitleError::EmptyContent { path: file });
        }
        debug!("Parsed {} blocks from {:?}", blocks.len(), short_path);

        let mut subtitle = Subtitle {
            blocks,
            ad_blocks: BTreeSet::new(),
            warning_blocks: BTreeSet::new(),
            language: String::new(),
            language_mismatch: false,
            file,
            short_path,
        };

        let text = subtitle.text_content();
        subtitle.language = resolver.determine(
            options.language.as_deref(),
            options.default_language.as_deref(),
            &subtitle.file,
            &text,
        )?;

        if !resolver.is_correct(&subtitle.language, &text)? {
            warn!(
                "{}: the language within the file does not match the file label: '{}'",
                subtitle.short_path.display(),
                subtitle.language
            );
            subtitle.language_mismatch = true;
        }

        if !options.destroy_list.is_empty() {
            subtitle.mark_blocks_for_deletion(&options.destroy_list);
        }

        Ok(subtitle)
    }

    /// Cue text of every block, concatenated without separators
    pub fn text_content(&self) -> String {
        self.blocks.iter().map(SubBlock::content).collect()
    }

    /// Mark a block as suspected advertisement, unless it is already a confirmed one
    pub fn warn(&mut self, id: BlockId) {
        if !self.contains(id) {
            warn!("Ignoring warning for unknown block {:?} in {}", id, self);
            return;
        }
        if !self.ad_blocks.contains(&id) {
            self.warning_blocks.insert(id);
        }
    }

    /// Mark a block as confirmed advertisement, clearing any warning on it
    pub fn ad(&mut self, id: BlockId) {
        if !self.contains(id) {
            warn!("Ignoring ad mark for unknown block {:?} in {}", id, self);
            return;
        }
        self.warning_blocks.remove(&id);
        self.ad_blocks.insert(id);
    }

    /// Force the blocks at the given 1-based positions to be deleted.
    /// Positions outside the document are ignored.
    pub fn mark_blocks_for_deletion(&mut self, positions: &[usize]) {
        for &position in positions {
            match position.checked_sub(1).and_then(|i| self.blocks.get_mut(i)) {
                Some(block) => block.confirm(),
                None => debug!("Deletion position {} is outside {}", position, self.short_path.display()),
            }
        }
    }

    /// Assign display indices 1..=n in sequence order
    pub fn reindex(&mut self) {
        for (i, block) in self.blocks.iter_mut().enumerate() {
            block.current_index = i + 1;
        }
    }

    /// Serialize the blocks back to SRT text using their current indices
    pub fn to_content(&self) -> String {
        let mut content: String = self
            .blocks
            .iter()
            .map(|block| format!("{}\n{}\n\n", block.current_index, block))
            .collect();
        content.pop();
        content
    }

    /// Current indices of the warning blocks, ascending
    pub fn warning_indexes(&self) -> Vec<String> {
        let mut indexes: Vec<usize> = self
            .warning_blocks
            .iter()
            .map(|id| self.blocks[id.0].current_index)
            .collect();
        indexes.sort_unstable();
        indexes.into_iter().map(|i| i.to_string()).collect()
    }

    /// Drop every block marked as ad, keeping warning marks on the survivors.
    /// Returns the number of removed blocks.
    pub(crate) fn drop_ad_blocks(&mut self) -> usize {
        let before = self.blocks.len();
        let mut kept = Vec::with_capacity(before);
        let mut warnings = BTreeSet::new();

        for (i, block) in std::mem::take(&mut self.blocks).into_iter().enumerate() {
            let id = BlockId(i);
            if self.ad_blocks.contains(&id) {
                continue;
            }
            if self.warning_blocks.contains(&id) {
                warnings.insert(BlockId(kept.len()));
            }
            kept.push(block);
        }

        self.blocks = kept;
        self.warning_blocks = warnings;
        self.ad_blocks.clear();
        before - self.blocks.len()
    }

    fn contains(&self, id: BlockId) -> bool {
        id.0 < self.blocks.len()
    }

    /// Blocks in sequence order together with their ids
    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &SubBlock)> + '_ {
        self.blocks.iter().enumerate().map(|(i, block)| (BlockId(i), block))
    }

    pub fn block(&self, id: BlockId) -> Option<&SubBlock> {
        self.blocks.get(id.0)
    }

    /// Mutable access for the classifier to record its score
    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut SubBlock> {
        self.blocks.get_mut(id.0)
    }

    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        (0..self.blocks.len()).map(BlockId)
    }

    pub fn is_ad(&self, id: BlockId) -> bool {
        self.ad_blocks.contains(&id)
    }

    pub fn is_warning(&self, id: BlockId) -> bool {
        self.warning_blocks.contains(&id)
    }

    pub fn ad_blocks(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.ad_blocks.iter().copied()
    }

    pub fn warning_blocks(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.warning_blocks.iter().copied()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether the detected content language disagreed with the resolved tag
    pub fn language_mismatch(&self) -> bool {
        self.language_mismatch
    }

    /// Re-run language validation against the current blocks
    pub fn language_is_correct(&self, resolver: &LanguageResolver) -> Result<bool, SubtitleError> {
        resolver.is_correct(&self.language, &self.text_content())
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn short_path(&self) -> &Path {
        &self.short_path
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl fmt::Display for Subtitle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.file.display())
    }
}
