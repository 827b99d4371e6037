//! Clean command - remove collected libraries

use anyhow::{Context, Result};
use rustjni_build::Orchestrator;
use std::path::Path;

pub fn run(project_dir: &Path, quiet: bool) -> Result<()> {
    let config = super::load_bridge(project_dir)?;
    let stats = Orchestrator::new(&config)?
        .clean()
        .context("Failed to clean build artifacts")?;

    if !quiet {
        println!(
            "Removed {} file(s), {} bytes from {}",
            stats.files,
            stats.bytes,
            config.output_dir.display()
        );
    }
    Ok(())
}
