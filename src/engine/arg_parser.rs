use clap::Parser;
use std::path::PathBuf;

/// Report the largest files under a directory tree.
#[derive(Clone, Debug, Parser)]
#[command(name = "topfiles")]
#[command(about = "Report the N largest files under a directory; use --live to watch the ranking while scanning.")]
pub struct Cli {
    /// Root directory to scan.
    #[arg(long, short, value_name = "DIR")]
    pub path: PathBuf,

    /// Number of largest files to report. Default: 100.
    #[arg(long, short, value_parser = clap::value_parser!(usize))]
    pub limit: Option<usize>,

    /// Redraw the current ranking while scanning instead of printing once at the end.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub live: Option<bool>,

    /// Walker thread count. Default: available cores, capped by the open-file limit.
    #[arg(long, short, value_parser = clap::value_parser!(usize))]
    pub threads: Option<usize>,

    /// Live redraw interval in milliseconds. Default: 10.
    #[arg(long, short, value_name = "MS", value_parser = clap::value_parser!(u64))]
    pub interval: Option<u64>,

    /// Verbose output (debug logging on stderr).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
