use std::path::PathBuf;

use crate::error::TraversalError;

/// Summarize traversal errors drained from the diagnostic queue. Call after the walk has joined.
/// Never fails: partial results are still a successful scan.
pub fn report_skipped_paths(errors: &[TraversalError]) -> Vec<PathBuf> {
    if !errors.is_empty() {
        log::warn!(
            "Skipped {} paths due to permission errors or access issues",
            errors.len()
        );
        for e in errors {
            log::debug!("  skipped: {}", e);
        }
    }
    errors.iter().map(|e| e.path().to_path_buf()).collect()
}
