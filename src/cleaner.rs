use log::info;
use crate::subtitle::{BlockId, Subtitle};

// @module: Removal of advertisement blocks from a classified document

/// Outcome of purging a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeReport {
    /// Number of blocks removed
    pub removed: usize,
    /// Display indices of the remaining warning blocks, after reindexing
    pub warning_indexes: Vec<String>,
}

/// Remove every confirmed or ad-marked block and renumber the rest.
///
/// Blocks whose classification was forced to confirmed are marked as ad
/// first, so forced deletions and classifier verdicts go through the same
/// mark set.
pub fn purge(subtitle: &mut Subtitle) -> PurgeReport {
    let confirmed: Vec<BlockId> = subtitle
        .blocks()
        .filter(|(_, block)| block.classification.is_confirmed())
        .map(|(id, _)| id)
        .collect();
    for id in confirmed {
        subtitle.ad(id);
    }

    let removed = subtitle.drop_ad_blocks();
    subtitle.reindex();

    if removed > 0 {
        info!("Removed {} block(s) from {}", removed, subtitle.short_path().display());
    }

    PurgeReport {
        removed,
        warning_indexes: subtitle.warning_indexes(),
    }
}
