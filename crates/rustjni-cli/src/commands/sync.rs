//! Sync command - reconcile host declarations with native exports

use anyhow::{Context, Result};
use rustjni_reflect::Synchronizer;
use std::path::Path;

pub fn run(project_dir: &Path, quiet: bool) -> Result<()> {
    let config = super::load_bridge(project_dir)?;
    let report = Synchronizer::new(&config)
        .synchronize()
        .context("Synchronization failed")?;

    if quiet {
        return Ok(());
    }

    if report.skipped {
        println!("Function export disabled, nothing to synchronize");
        return Ok(());
    }

    for name in &report.stubs_added {
        println!("  + native stub  {name}");
    }
    println!(
        "Synchronized {} declaration(s), {} new stub(s)",
        report.declarations.len(),
        report.stubs_added.len()
    );
    if !report.changed() {
        println!("Everything up to date");
    }
    Ok(())
}
