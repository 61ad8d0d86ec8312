//! topfiles CLI: print the largest files under --path; --live redraws while scanning.

use anyhow::Result;
use clap::Parser;
use std::time::Instant;
use topfiles::engine::{Cli, handle_run};

fn main() -> Result<()> {
    let start_time = Instant::now();
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
