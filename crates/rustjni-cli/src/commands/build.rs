//! Build command - sync, cross-compile and collect native libraries

use anyhow::{Context, Result};
use rustjni_build::{BuildReport, Orchestrator};
use std::path::PathBuf;

/// Build command arguments
pub struct BuildArgs {
    pub project_dir: PathBuf,
    /// Print the report as JSON
    pub json: bool,
    /// Suppress the human-readable summary
    pub quiet: bool,
}

/// Run the build command
pub fn run(args: BuildArgs) -> Result<()> {
    let config = super::load_bridge(&args.project_dir)?;
    let report = Orchestrator::new(&config)?.run().context("Build failed")?;

    if args.json {
        println!("{}", report.to_json()?);
    } else if !args.quiet {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &BuildReport) {
    println!("\n{}", "=".repeat(60));
    println!(
        "Build succeeded in {:.2}s",
        report.stats.total_time.as_secs_f64()
    );
    println!("{}", "=".repeat(60));
    println!("  Library: {}", report.lib_name);
    if let Some(version) = &report.toolchain_version {
        println!("  Toolchain: rustc {version}");
    }
    println!("  Architectures: {}", report.stats.architectures);
    for artifact in &report.artifacts {
        println!(
            "    {:<12} {} ({} bytes)",
            artifact.abi,
            artifact.output_path.display(),
            artifact.size()
        );
    }
    println!("  Native stubs added: {}", report.native_sync.stubs_added.len());
    println!("  Host declarations: {}", report.host_sync.declarations.len());
    println!("{}", "=".repeat(60));
}
