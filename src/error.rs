//! Error types for topfiles.
//!
//! - [`ConfigError`]: bad flags or settings; fatal, raised before the pipeline starts.
//! - [`TraversalError`]: one directory branch could not be listed or stat-ed; logged and skipped.
//!
//! The CLI surface works in `anyhow::Result`; these convert with `?`.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Invalid configuration. Reported before any stage is spawned.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("--limit must be at least 1")]
    LimitZero,

    #[error("--threads must be at least 1")]
    ThreadsZero,

    #[error("path does not exist or cannot be accessed: {}", .path.display())]
    RootMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not a directory: {}", .0.display())]
    RootNotDir(PathBuf),

    #[error("failed to build walker pool: {0}")]
    Pool(String),
}

/// A branch of the walk stopped early. Siblings and other subtrees are unaffected.
#[derive(Error, Debug)]
pub enum TraversalError {
    #[error("cannot list {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot stat {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TraversalError {
    /// Path the error was raised on.
    pub fn path(&self) -> &Path {
        match self {
            TraversalError::ReadDir { path, .. } | TraversalError::Stat { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        let source = match self {
            TraversalError::ReadDir { source, .. } | TraversalError::Stat { source, .. } => source,
        };
        source.kind() == io::ErrorKind::NotFound
    }
}
