//! Build orchestration and pipeline management
//!
//! One pass of [`Orchestrator::run`]:
//! 1. scaffold the native project when missing
//! 2. write `.cargo/config.toml`
//! 3. host → native declaration sync
//! 4. validate the rustc version
//! 5. install targets, clean the output dir, compile every architecture
//! 6. collect the shared libraries
//! 7. native → host declaration sync
//!
//! Every failure is fatal and aborts the remaining steps.

use crate::cargo_config;
use crate::error::{BuildError, BuildResult};
use crate::ndk;
use crate::process::{CommandRunner, Invocation, SystemRunner};
use crate::scaffold::{self, ScaffoldOutcome};
use crate::targets::{self, BuildArtifact};
use crate::toolchain::{self, CargoDirLocator, Tool, ToolchainLocator};
use rustjni_config::BridgeConfig;
use rustjni_reflect::{ReflectError, SyncReport, Synchronizer};
use serde::{Serialize, Serializer};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Build statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildStats {
    /// Number of architectures compiled
    pub architectures: usize,
    /// Time spent in `cargo build`
    #[serde(serialize_with = "as_secs")]
    pub compilation_time: Duration,
    /// Time spent copying artifacts
    #[serde(serialize_with = "as_secs")]
    pub collection_time: Duration,
    /// Total pass time
    #[serde(serialize_with = "as_secs")]
    pub total_time: Duration,
}

fn as_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Result of a full build pass
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub lib_name: String,
    /// The native project was created by this pass
    pub scaffolded: bool,
    /// Rustc version checked against the configured constraint
    pub toolchain_version: Option<String>,
    pub cargo_config: PathBuf,
    pub native_sync: SyncReport,
    pub host_sync: SyncReport,
    pub artifacts: Vec<BuildArtifact>,
    pub stats: BuildStats,
}

impl BuildReport {
    pub fn to_json(&self) -> BuildResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// What `clean` removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub files: usize,
    pub bytes: u64,
}

/// Drives the toolchain for one resolved configuration
pub struct Orchestrator<'a> {
    config: &'a BridgeConfig,
    locator: Box<dyn ToolchainLocator + 'a>,
    runner: Box<dyn CommandRunner + 'a>,
}

impl<'a> Orchestrator<'a> {
    /// Orchestrator using the configured cargo dir and real processes
    pub fn new(config: &'a BridgeConfig) -> BuildResult<Self> {
        let locator = CargoDirLocator::from_config(config)?;
        Ok(Self::with_tools(config, locator, SystemRunner))
    }

    /// Orchestrator with injected toolchain capabilities
    pub fn with_tools(
        config: &'a BridgeConfig,
        locator: impl ToolchainLocator + 'a,
        runner: impl CommandRunner + 'a,
    ) -> Self {
        Self {
            config,
            locator: Box::new(locator),
            runner: Box::new(runner),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        self.config
    }

    /// Create the native project when missing; no-op otherwise.
    ///
    /// A fresh project is synchronized immediately: stubs for declarations
    /// the host already has, then the host block.
    pub fn ensure_project_scaffold(&self) -> BuildResult<ScaffoldOutcome> {
        if self.config.native_root.exists() {
            return scaffold::scaffold_native_project(self.config, false);
        }

        let sync = Synchronizer::new(self.config);
        let host_has_block = match sync.host_has_block() {
            Ok(present) => present,
            Err(ReflectError::HostFileNotFound { .. }) if !self.config.export_functions => false,
            Err(e) => return Err(e.into()),
        };

        let outcome = scaffold::scaffold_native_project(self.config, host_has_block)?;
        if self.config.architectures.is_empty() {
            tracing::warn!("no architectures configured yet, skipping cargo config");
        } else {
            self.write_cargo_config()?;
        }

        if matches!(outcome, ScaffoldOutcome::CreatedEmpty { .. }) {
            sync.seed_native()?;
        }
        sync.sync_host()?;
        Ok(outcome)
    }

    /// Write `.cargo/config.toml` for every configured architecture
    pub fn write_cargo_config(&self) -> BuildResult<PathBuf> {
        let architectures = self.config.require_architectures()?;
        let prebuilt = ndk::prebuilt_bin_dir(self.config)?;
        cargo_config::write_config(
            &self.config.native_root,
            architectures,
            prebuilt.as_deref(),
            self.config.host_os,
        )
    }

    /// Both synchronization directions; a conflict writes nothing
    pub fn synchronize_declarations(&self) -> BuildResult<SyncReport> {
        Ok(Synchronizer::new(self.config).synchronize()?)
    }

    /// Check rustc against the configured constraint
    pub fn validate_toolchain(&self) -> BuildResult<Option<semver::Version>> {
        toolchain::validate_version(
            self.config.toolchain_version.as_ref(),
            self.locator.as_ref(),
            self.runner.as_ref(),
            &self.config.native_root,
        )
    }

    /// Install every target, clean the output dir, then compile each
    /// architecture in order; the first failure aborts the rest
    pub fn compile_all_architectures(&self) -> BuildResult<Vec<Invocation>> {
        let architectures = self.config.require_architectures()?;
        let cwd = &self.config.native_root;

        let rustup = self.locator.locate(Tool::Rustup)?;
        for arch in architectures {
            self.runner
                .run(&rustup, &["target", "add", arch.target.as_str()], cwd)?
                .check()?;
        }

        self.clean()?;

        let cargo = self.locator.locate(Tool::Cargo)?;
        let mut invocations = Vec::with_capacity(architectures.len());
        for arch in architectures {
            tracing::info!(triple = %arch.target, "compiling");
            let invocation = self
                .runner
                .run(
                    &cargo,
                    &["build", "--target", arch.target.as_str(), "--release", "--verbose"],
                    cwd,
                )?
                .check()?;
            tracing::info!(
                triple = %arch.target,
                secs = invocation.duration.as_secs_f64(),
                "compiled"
            );
            invocations.push(invocation);
        }
        Ok(invocations)
    }

    /// Copy each architecture's library into its ABI-named output dir
    pub fn collect_artifacts(&self) -> BuildResult<Vec<BuildArtifact>> {
        let architectures = self.config.require_architectures()?;

        architectures
            .iter()
            .map(|arch| {
                let file_name = targets::library_file_name(&self.config.lib_name, &arch.target);
                let source = targets::compiled_library_path(
                    &self.config.native_root,
                    &self.config.lib_name,
                    &arch.target,
                );
                let output = self
                    .config
                    .output_dir
                    .join(targets::abi_dir(&arch.target))
                    .join(file_name);

                let artifact = BuildArtifact::collect(&arch.target, source, output)?;
                tracing::info!(
                    abi = %artifact.abi,
                    size = artifact.size(),
                    path = %artifact.output_path.display(),
                    "collected library"
                );
                Ok(artifact)
            })
            .collect()
    }

    /// Remove the output directory
    pub fn clean(&self) -> BuildResult<CleanStats> {
        let dir = &self.config.output_dir;
        if !dir.exists() {
            return Ok(CleanStats::default());
        }

        let stats = WalkDir::new(dir)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .fold(CleanStats::default(), |acc, entry| CleanStats {
                files: acc.files + 1,
                bytes: acc.bytes + entry.metadata().map(|m| m.len()).unwrap_or(0),
            });

        fs::remove_dir_all(dir).map_err(|e| BuildError::io(dir, e))?;
        tracing::info!(dir = %dir.display(), files = stats.files, "cleaned output directory");
        Ok(stats)
    }

    /// Full build pass
    pub fn run(&self) -> BuildResult<BuildReport> {
        let start = Instant::now();

        let scaffolded = self.ensure_project_scaffold()?.created();
        let cargo_config = self.write_cargo_config()?;

        let sync = Synchronizer::new(self.config);
        let native_sync = sync.sync_native()?;

        let toolchain_version = self.validate_toolchain()?.map(|v| v.to_string());

        let compile_start = Instant::now();
        let invocations = self.compile_all_architectures()?;
        let compilation_time = compile_start.elapsed();

        let collect_start = Instant::now();
        let artifacts = self.collect_artifacts()?;
        let collection_time = collect_start.elapsed();

        let host_sync = sync.sync_host()?;

        let stats = BuildStats {
            architectures: invocations.len(),
            compilation_time,
            collection_time,
            total_time: start.elapsed(),
        };
        tracing::info!(
            artifacts = artifacts.len(),
            secs = stats.total_time.as_secs_f64(),
            "build completed"
        );

        Ok(BuildReport {
            lib_name: self.config.lib_name.clone(),
            scaffolded,
            toolchain_version,
            cargo_config,
            native_sync,
            host_sync,
            artifacts,
            stats,
        })
    }
}
