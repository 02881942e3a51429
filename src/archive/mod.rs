//! Bulk download archive.
//!
//! Builds one zip with every active asset, foldered by variant:
//! ```text
//! icon-only/<filename>
//! with-text-transparent/<filename>
//! with-text-solid-background/<filename>
//! ```
//! Assets whose file cannot be found get a `.txt` placeholder instead, so the
//! archive always holds one entry per eligible record.

mod plan;
mod writer;

use std::fmt;

pub use plan::{ArchivePlan, PlannedEntry};
pub use writer::write_archive;

/// Download name of the bulk archive
pub const BUNDLE_FILENAME: &str = "matson-digital-assets.zip";

/// Progress of one archive build, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveStage {
    Fetching,
    Grouping,
    Writing {
        group: usize,
        groups: usize,
        entry: usize,
        entries: usize,
    },
    Finalizing,
    Done,
    Failed,
}

impl fmt::Display for ArchiveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveStage::Fetching => write!(f, "fetching"),
            ArchiveStage::Grouping => write!(f, "grouping"),
            ArchiveStage::Writing {
                group,
                groups,
                entry,
                entries,
            } => write!(f, "writing group {}/{} entry {}/{}", group, groups, entry, entries),
            ArchiveStage::Finalizing => write!(f, "finalizing"),
            ArchiveStage::Done => write!(f, "done"),
            ArchiveStage::Failed => write!(f, "failed"),
        }
    }
}
