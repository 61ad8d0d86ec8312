use anyhow::Result;
use log::debug;
use std::path::Path;

use crate::error::ConfigError;
use crate::pipeline::present::Render;
use crate::pipeline::{self, PipelineChannels, PipelineContext};
use crate::{ScanOpts, ScanOutcome};

/// Check options and root before any stage is spawned.
pub fn validate_scan(root: &Path, opts: &ScanOpts) -> Result<(), ConfigError> {
    if opts.limit == 0 {
        return Err(ConfigError::LimitZero);
    }
    if opts.num_threads == Some(0) {
        return Err(ConfigError::ThreadsZero);
    }
    let meta = std::fs::metadata(root).map_err(|source| ConfigError::RootMissing {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(ConfigError::RootNotDir(root.to_path_buf()));
    }
    Ok(())
}

/// Main orchestrator: walk → records → aggregate → snapshots → present → done.
///
/// Shutdown runs strictly downstream: the walk thread drops the records sender after its task
/// tree joins; the aggregator sends its final snapshot and drops the snapshots sender; the
/// presenter draws the final snapshot and signals on the done queue. Only then are the stage
/// threads joined and the diagnostic queue drained.
pub fn run_scan<R>(root: &Path, opts: &ScanOpts, renderer: R) -> Result<ScanOutcome>
where
    R: Render + Send + 'static,
{
    validate_scan(root, opts)?;
    let ctx = PipelineContext::new(root, opts);
    debug!(
        "Seeking top {} biggest files in '{}' (live: {})",
        ctx.limit,
        ctx.root.display(),
        ctx.live
    );

    let PipelineChannels {
        record_tx,
        record_rx,
        snapshot_tx,
        snapshot_rx,
        done_tx,
        done_rx,
        error_tx,
        error_rx,
    } = pipeline::create_pipeline_channels();

    let walk_handle = pipeline::spawn_walk_thread(&ctx, record_tx, error_tx)?;
    let aggregate_handle = pipeline::spawn_aggregate_thread(record_rx, snapshot_tx, ctx.limit);
    let present_handle = pipeline::spawn_present_thread(
        snapshot_rx,
        done_tx,
        renderer,
        ctx.live,
        ctx.refresh_interval,
    );

    let report = done_rx
        .recv()
        .map_err(|_| anyhow::anyhow!("presenter stopped without signaling completion"))?;
    debug!("main: presenter done after {} renders", report.renders);

    let summary = walk_handle
        .join()
        .map_err(|_| anyhow::anyhow!("walk thread panicked"))?;
    aggregate_handle
        .join()
        .map_err(|_| anyhow::anyhow!("aggregate thread panicked"))?;
    present_handle
        .join()
        .map_err(|_| anyhow::anyhow!("present thread panicked"))?;

    let errors: Vec<_> = error_rx.try_iter().collect();
    let skipped = pipeline::report_skipped_paths(&errors);

    Ok(ScanOutcome {
        top: report.final_snapshot,
        summary,
        renders: report.renders,
        skipped,
    })
}
