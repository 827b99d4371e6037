//! Project initialization command (rustjni init)

use anyhow::{bail, Context, Result};
use rustjni_build::{Orchestrator, ScaffoldOutcome};
use rustjni_config::project::{BridgeSection, LibraryConfig};
use rustjni_config::{AndroidTarget, ArchitectureConfig, ClassName, ProjectConfig, PROJECT_CONFIG_FILE};
use std::fs;
use std::path::PathBuf;

/// Arguments for the init command
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    pub project_dir: PathBuf,
    /// Bridge-host class written to a new rustjni.toml
    pub host: Option<String>,
    /// Library name written to a new rustjni.toml
    pub lib_name: Option<String>,
    /// API level for the default Android architectures
    pub android_api: Option<u32>,
    pub quiet: bool,
}

impl InitArgs {
    fn has_project_settings(&self) -> bool {
        self.host.is_some() || self.lib_name.is_some() || self.android_api.is_some()
    }
}

/// Run the init command
pub fn run(args: InitArgs) -> Result<()> {
    let manifest_path = args.project_dir.join(PROJECT_CONFIG_FILE);

    if manifest_path.exists() {
        if args.has_project_settings() {
            bail!(
                "Project already initialized: {} exists at {}",
                PROJECT_CONFIG_FILE,
                manifest_path.display()
            );
        }
    } else {
        let project = project_config(&args)?;
        let content = toml::to_string(&project).context("Failed to render project configuration")?;
        fs::write(&manifest_path, content)
            .with_context(|| format!("Failed to write {}", manifest_path.display()))?;
        if !args.quiet {
            println!("Created {}", manifest_path.display());
        }
    }

    let config = super::load_bridge(&args.project_dir)?;
    let outcome = Orchestrator::new(&config)?
        .ensure_project_scaffold()
        .context("Failed to scaffold the native project")?;

    if !args.quiet {
        match outcome {
            ScaffoldOutcome::Existing => {
                println!("Native project already exists at {}", config.native_root.display())
            }
            ScaffoldOutcome::CreatedSample { entry } | ScaffoldOutcome::CreatedEmpty { entry } => {
                println!("Created native library '{}'", config.lib_name);
                println!("  Entry: {}", entry.display());
            }
        }
        if config.architectures.is_empty() {
            println!("\nAdd [[architectures]] to {PROJECT_CONFIG_FILE} before running `rustjni build`");
        }
    }
    Ok(())
}

/// Project configuration for a fresh rustjni.toml
fn project_config(args: &InitArgs) -> Result<ProjectConfig> {
    let Some(host) = &args.host else {
        bail!("--host is required when {PROJECT_CONFIG_FILE} does not exist");
    };
    ClassName::parse(host)?;

    if let Some(name) = &args.lib_name {
        validate_lib_name(name)?;
    }

    Ok(ProjectConfig {
        library: args.lib_name.as_ref().map(|name| LibraryConfig {
            name: Some(name.clone()),
            ..Default::default()
        }),
        bridge: Some(BridgeSection {
            host: Some(host.clone()),
            ..Default::default()
        }),
        architectures: args.android_api.map(android_architectures).unwrap_or_default(),
        ..Default::default()
    })
}

/// The four Android targets with their NDK clang wrappers
fn android_architectures(api: u32) -> Vec<ArchitectureConfig> {
    AndroidTarget::ALL
        .iter()
        .map(|target| {
            let prefix = match *target {
                AndroidTarget::ARMV7_LINUX_ANDROIDEABI => "armv7a-linux-androideabi",
                other => other,
            };
            ArchitectureConfig::new(*target, format!("{prefix}{api}-clang"))
        })
        .collect()
}

/// Validate a native library name
fn validate_lib_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    match chars.next() {
        None => bail!("Library name cannot be empty"),
        Some(first) if !first.is_ascii_alphabetic() => {
            bail!("Library name must start with a letter: {name}")
        }
        _ => {}
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-')) {
        bail!("Library name contains invalid character '{bad}': {name}");
    }
    Ok(())
}
