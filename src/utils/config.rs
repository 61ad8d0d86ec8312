//! Application configuration constants.
//! Tuning and defaults in one place.

use std::sync::OnceLock;
use std::time::Duration;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    settings_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                settings_filename: format!(".{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Name of the optional settings file looked up in the working directory.
    pub fn settings_filename(&self) -> &str {
        &self.settings_filename
    }
}

// ---- Ranking ----

/// Default N when neither CLI nor settings file sets `limit`.
pub const DEFAULT_LIMIT: usize = 100;

/// Up-front reservation cap for the top-N buffer; larger limits grow as records arrive.
pub const TOPN_INITIAL_CAPACITY: usize = 4096;

// ---- Live mode ----

/// Live redraw cadence.
pub struct LiveConsts;

impl LiveConsts {
    /// Default refresh interval in milliseconds.
    pub const DEFAULT_INTERVAL_MS: u64 = 10;
    /// Clear screen and move the cursor home before redrawing.
    pub const CLEAR_SCREEN: &'static str = "\x1b[2J\x1b[H";

    pub fn default_interval() -> Duration {
        Duration::from_millis(Self::DEFAULT_INTERVAL_MS)
    }
}

// ---- Worker threads ----

/// Walker pool limits. Use [`WorkerThreadLimits::current()`] to fill `all_threads` from rayon.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Never go below this many walker threads.
    pub floor: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const FLOOR_THREADS: usize = 1;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }
}
