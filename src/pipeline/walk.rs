//! Fan-out walker: one traversal task per directory on a bounded rayon pool, joined as a tree.
//!
//! Each directory task lists its entries, sends a [`FileRecord`] per regular file on the
//! records queue (blocking until the aggregator takes it) and spawns a child task per
//! subdirectory into the same [`rayon::Scope`]. The scope only returns once every task it
//! ever received has finished, so dropping the records sender after it is the close.
//!
//! [`TaskTracker`] counts outstanding tasks. The count is raised by the parent before the
//! child is queued and lowered when the child's [`TaskGuard`] drops, error paths included.

use crossbeam_channel::Sender;
use log::{debug, warn};
use rayon::{Scope, ThreadPool, ThreadPoolBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use crate::error::{ConfigError, TraversalError};
use crate::utils::config::PackagePaths;
use crate::{FileRecord, WalkSummary};

use super::context::PipelineContext;

/// Outstanding-task counter for the whole traversal tree.
#[derive(Debug, Default)]
pub struct TaskTracker {
    outstanding: AtomicUsize,
    started: AtomicUsize,
}

impl TaskTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one task. The task is finished when the returned guard drops.
    pub fn enter(&self) -> TaskGuard<'_> {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        self.started.fetch_add(1, Ordering::Relaxed);
        TaskGuard { tracker: self }
    }

    /// Tasks registered but not yet finished.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Tasks ever registered.
    pub fn started(&self) -> usize {
        self.started.load(Ordering::Relaxed)
    }
}

/// Held by a running traversal task; releases its slot in [`TaskTracker`] on drop.
#[must_use = "dropping the guard marks the task finished"]
pub struct TaskGuard<'a> {
    tracker: &'a TaskTracker,
}

impl Drop for TaskGuard<'_> {
    fn drop(&mut self) {
        self.tracker.outstanding.fetch_sub(1, Ordering::SeqCst);
    }
}

/// State shared by every task of one walk. Dropped by the walk thread after the scope joins.
struct WalkState {
    record_tx: Sender<FileRecord>,
    error_tx: Sender<TraversalError>,
    tracker: TaskTracker,
    files_emitted: AtomicUsize,
    errors: AtomicUsize,
}

impl WalkState {
    fn new(record_tx: Sender<FileRecord>, error_tx: Sender<TraversalError>) -> Self {
        Self {
            record_tx,
            error_tx,
            tracker: TaskTracker::new(),
            files_emitted: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
        }
    }

    fn summary(&self) -> WalkSummary {
        WalkSummary {
            dirs_visited: self.tracker.started(),
            files_emitted: self.files_emitted.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }

    fn report(&self, err: TraversalError) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        // Entries vanishing mid-walk are routine on live filesystems.
        if err.is_not_found() {
            debug!("{}", err);
        } else {
            warn!("{}", err);
        }
        let _ = self.error_tx.send(err);
    }
}

/// Build the bounded walker pool.
pub fn build_walk_pool(num_threads: usize) -> Result<ThreadPool, ConfigError> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("{}-walk-{}", PackagePaths::get().pkg_name(), i))
        .build()
        .map_err(|e| ConfigError::Pool(e.to_string()))
}

/// Spawn the walk thread. It owns `record_tx` and `error_tx` and drops both once the
/// entire task tree rooted at `ctx.root` has joined. Returns the walk's counters on join.
pub fn spawn_walk_thread(
    ctx: &PipelineContext,
    record_tx: Sender<FileRecord>,
    error_tx: Sender<TraversalError>,
) -> Result<JoinHandle<WalkSummary>, ConfigError> {
    let pool = build_walk_pool(ctx.num_threads)?;
    debug!("Walking with {} threads", ctx.num_threads);
    let root = ctx.root.clone();
    Ok(thread::spawn(move || walk_tree(&pool, root, record_tx, error_tx)))
}

/// Walk `root` on `pool` and return once every task has finished. Senders are dropped on return.
pub fn walk_tree(
    pool: &ThreadPool,
    root: PathBuf,
    record_tx: Sender<FileRecord>,
    error_tx: Sender<TraversalError>,
) -> WalkSummary {
    let state = WalkState::new(record_tx, error_tx);
    pool.scope(|s| {
        let guard = state.tracker.enter();
        walk_dir(s, &state, root, guard);
    });
    debug_assert_eq!(
        state.tracker.outstanding(),
        0,
        "walk scope joined with traversal tasks still outstanding"
    );
    let summary = state.summary();
    debug!(
        "walk: task tree joined ({} dirs, {} files, {} errors)",
        summary.dirs_visited, summary.files_emitted, summary.errors
    );
    summary
}

/// One traversal task. `_guard` is released when this returns, whether or not the listing succeeded.
fn walk_dir<'s>(scope: &Scope<'s>, state: &'s WalkState, dir: PathBuf, _guard: TaskGuard<'s>) {
    if let Err(err) = visit_dir(scope, state, &dir) {
        state.report(err);
    }
}

/// List `dir` in name order; emit files, spawn subdirectories. The first failure ends this
/// directory's loop. Children already spawned keep running.
fn visit_dir<'s>(
    scope: &Scope<'s>,
    state: &'s WalkState,
    dir: &Path,
) -> Result<(), TraversalError> {
    let read_dir_err = |source| TraversalError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = fs::read_dir(dir)
        .map_err(read_dir_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_dir_err)?;
    paths.sort();

    for path in paths {
        // Follows symlinks; no cycle detection.
        let meta = fs::metadata(&path).map_err(|source| TraversalError::Stat {
            path: path.clone(),
            source,
        })?;
        if meta.is_dir() {
            let guard = state.tracker.enter();
            scope.spawn(move |s| walk_dir(s, state, path, guard));
        } else if meta.is_file() {
            let record = FileRecord {
                path,
                size: meta.len(),
            };
            if state.record_tx.send(record).is_err() {
                debug!("walk: records queue has no receiver, stopping {}", dir.display());
                return Ok(());
            }
            state.files_emitted.fetch_add(1, Ordering::Relaxed);
        } else {
            debug!("walk: skipping special file {}", path.display());
        }
    }
    Ok(())
}
