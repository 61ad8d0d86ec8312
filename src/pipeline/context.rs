//! Pipeline context and channels: the explicit settings object each stage receives, and the queues between stages.

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::TraversalError;
use crate::pipeline::present::PresentReport;
use crate::utils::config::WorkerThreadLimits;
use crate::utils::fd_limit::walker_threads;
use crate::{FileRecord, ScanOpts, Snapshot};

/// Rendezvous: a send blocks until the receiving stage takes the item.
pub const RENDEZVOUS_CAP: usize = 0;

/// Settings carried explicitly into each stage. Built once in `run_scan` from [`ScanOpts`].
#[derive(Clone, Debug)]
pub struct PipelineContext {
    pub root: PathBuf,
    pub limit: usize,
    pub live: bool,
    pub refresh_interval: Duration,
    pub num_threads: usize,
}

impl PipelineContext {
    pub fn new(root: &Path, opts: &ScanOpts) -> Self {
        let limits = WorkerThreadLimits::current();
        Self {
            root: root.to_path_buf(),
            limit: opts.limit,
            live: opts.live,
            refresh_interval: opts.refresh_interval,
            num_threads: walker_threads(opts.num_threads, limits.all_threads, limits.floor),
        }
    }
}

/// Queues for one run. Each sender is moved into exactly one stage; that stage dropping it is the close.
///
/// - records: walker → aggregator
/// - snapshots: aggregator → presenter
/// - done: presenter → caller
/// - errors: walker → caller (diagnostic sink, unbounded so the walk never waits on it)
pub struct PipelineChannels {
    pub record_tx: Sender<FileRecord>,
    pub record_rx: Receiver<FileRecord>,
    pub snapshot_tx: Sender<Snapshot>,
    pub snapshot_rx: Receiver<Snapshot>,
    pub done_tx: Sender<PresentReport>,
    pub done_rx: Receiver<PresentReport>,
    pub error_tx: Sender<TraversalError>,
    pub error_rx: Receiver<TraversalError>,
}

pub fn create_pipeline_channels() -> PipelineChannels {
    let (record_tx, record_rx) = bounded::<FileRecord>(RENDEZVOUS_CAP);
    let (snapshot_tx, snapshot_rx) = bounded::<Snapshot>(RENDEZVOUS_CAP);
    let (done_tx, done_rx) = bounded::<PresentReport>(RENDEZVOUS_CAP);
    let (error_tx, error_rx) = unbounded::<TraversalError>();
    PipelineChannels {
        record_tx,
        record_rx,
        snapshot_tx,
        snapshot_rx,
        done_tx,
        done_rx,
        error_tx,
        error_rx,
    }
}
