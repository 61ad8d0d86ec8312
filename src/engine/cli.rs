//! CLI command handler: resolve settings (CLI > `.topfiles.toml` > defaults), then scan.

use anyhow::Result;
use log::{debug, warn};
use std::path::PathBuf;
use std::time::Duration;

use crate::engine::arg_parser::Cli;
use crate::pipeline::{TableRenderer, run_scan};
use crate::utils::config::{DEFAULT_LIMIT, LiveConsts};
use crate::utils::{TopfilesToml, load_topfiles_toml, setup_logging};
use crate::{ScanOpts, ScanOutcome};

/// Fully resolved CLI settings.
#[derive(Clone, Debug)]
pub struct Settings {
    pub root: PathBuf,
    pub opts: ScanOpts,
    pub verbose: bool,
}

/// Merge CLI flags over the settings file over defaults. Validation happens in `run_scan`.
pub fn resolve_settings(cli: &Cli, file: Option<&TopfilesToml>) -> Settings {
    let file = file.map(|f| &f.settings);
    let limit = cli
        .limit
        .or_else(|| file.and_then(|f| f.limit))
        .unwrap_or(DEFAULT_LIMIT);
    let live = cli
        .live
        .or_else(|| file.and_then(|f| f.live))
        .unwrap_or(false);
    let num_threads = cli.threads.or_else(|| file.and_then(|f| f.threads));
    let interval_ms = cli
        .interval
        .or_else(|| file.and_then(|f| f.interval_ms))
        .unwrap_or(LiveConsts::DEFAULT_INTERVAL_MS);
    let verbose = cli
        .verbose
        .or_else(|| file.and_then(|f| f.verbose))
        .unwrap_or(false);

    Settings {
        root: cli.path.clone(),
        opts: ScanOpts {
            limit,
            live,
            num_threads,
            // A zero interval would make the ticker spin.
            refresh_interval: Duration::from_millis(interval_ms.max(1)),
        },
        verbose,
    }
}

/// Run a scan from parsed CLI flags and print the table to stdout.
pub fn handle_run(cli: &Cli) -> Result<ScanOutcome> {
    let (file, file_err) = match std::env::current_dir() {
        Ok(cwd) => match load_topfiles_toml(&cwd) {
            Ok(file) => (file, None),
            Err(e) => (None, Some(e)),
        },
        Err(_) => (None, None),
    };
    let settings = resolve_settings(cli, file.as_ref());
    setup_logging(settings.verbose);
    if let Some(e) = file_err {
        warn!("ignoring settings file: {:#}", e);
    }
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        settings
    );

    let renderer = TableRenderer::stdout(settings.opts.live);
    let outcome = run_scan(&settings.root, &settings.opts, renderer)?;
    debug!(
        "Scanned {} files in {} directories ({} branches skipped)",
        outcome.summary.files_emitted, outcome.summary.dirs_visited, outcome.summary.errors
    );
    Ok(outcome)
}
