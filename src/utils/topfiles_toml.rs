//! Load `.topfiles.toml` from a directory (CLI only). Lib callers pass [`ScanOpts`](crate::ScanOpts) directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io;
use std::path::Path;

use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct TopfilesToml {
    #[serde(default)]
    pub settings: SettingsSection,
}

/// Every key is optional; absent keys fall through to CLI defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsSection {
    pub limit: Option<usize>,
    pub live: Option<bool>,
    pub threads: Option<usize>,
    pub interval_ms: Option<u64>,
    pub verbose: Option<bool>,
}

/// Load the settings file from `dir`. `Ok(None)` when there is no file; `Err` when it exists but
/// cannot be read or parsed (the CLI warns and carries on without it).
pub fn load_topfiles_toml(dir: &Path) -> Result<Option<TopfilesToml>> {
    let path = dir.join(PackagePaths::get().settings_filename());
    let s = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
    };
    parse_topfiles_toml(&s)
        .with_context(|| format!("parse {}", path.display()))
        .map(Some)
}

pub fn parse_topfiles_toml(s: &str) -> Result<TopfilesToml, toml::de::Error> {
    toml::from_str(s)
}
