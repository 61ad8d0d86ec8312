//! topfiles: report the N largest files under a directory tree.
//!
//! Three stages joined by rendezvous queues: a fan-out walker emitting one
//! [`FileRecord`] per file, a streaming top-N aggregator emitting ranked
//! [`Snapshot`]s, and a presenter drawing the latest one (once at the end, or on a
//! timer in live mode).

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use error::{ConfigError, TraversalError};
pub use pipeline::{Render, RenderKind, TableRenderer, run_scan};
pub use types::*;

/// Result alias used by public topfiles API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Scan `root` with `opts` and return the final top-N without printing anything.
///
/// ```no_run
/// let opts = topfiles::ScanOpts { limit: 10, ..Default::default() };
/// let outcome = topfiles::top_files(std::path::Path::new("/var/log"), &opts)?;
/// for record in &outcome.top {
///     println!("{} {}", record.path.display(), record.size);
/// }
/// # Ok::<(), topfiles::Error>(())
/// ```
pub fn top_files(root: &std::path::Path, opts: &ScanOpts) -> Result<ScanOutcome> {
    run_scan(root, opts, NullRenderer)
}

/// Renderer that draws nothing, for library callers that only want the result.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Render for NullRenderer {
    fn render(&mut self, _snapshot: &[FileRecord], _kind: RenderKind) -> std::io::Result<()> {
        Ok(())
    }
}
