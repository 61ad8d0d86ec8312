//! Public and internal types for the topfiles API and pipeline.

use std::path::PathBuf;
use std::time::Duration;

use crate::utils::config::{DEFAULT_LIMIT, LiveConsts};

/// One observed regular file. Emitted by the walker, consumed once by the aggregator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Logical size in bytes (not allocated blocks).
    pub size: u64,
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Ranked top-N at one point in time: descending by size, ties in discovery order, `len() <= limit`.
pub type Snapshot = Vec<FileRecord>;

/// Counters reported by the walk thread once the whole task tree has joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Directories whose traversal task ran (root included), whether or not listing succeeded.
    pub dirs_visited: usize,
    /// File records handed to the aggregator.
    pub files_emitted: usize,
    /// Branches that stopped early on a traversal error.
    pub errors: usize,
}

/// Result of [`run_scan`](crate::run_scan): the final ranking and what the walk saw.
#[derive(Clone, Debug, Default)]
pub struct ScanOutcome {
    pub top: Snapshot,
    pub summary: WalkSummary,
    /// Number of times the presenter drew a table.
    pub renders: usize,
    /// Directories (or entries) whose branch stopped on a traversal error.
    pub skipped: Vec<PathBuf>,
}

/// Lib options for [`run_scan`](crate::run_scan).
#[derive(Clone, Debug)]
pub struct ScanOpts {
    /// N: how many of the largest files to keep.
    pub limit: usize,
    /// Redraw the latest ranking on a timer while scanning.
    pub live: bool,
    /// Walker pool size. When None, rayon's default capped by the FD limit.
    pub num_threads: Option<usize>,
    /// Live redraw cadence.
    pub refresh_interval: Duration,
}

impl Default for ScanOpts {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            live: false,
            num_threads: None,
            refresh_interval: LiveConsts::default_interval(),
        }
    }
}
