//! Dicomdex CLI: import a DICOM directory or DICOMDIR catalog into a local index.

use anyhow::Result;
use clap::Parser;
use dicomdex::engine::Cli;
use dicomdex::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
