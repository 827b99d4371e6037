//! Toolchain discovery and version validation

use crate::error::{BuildError, BuildResult};
use crate::process::CommandRunner;
use rustjni_config::{BridgeConfig, HostOs, VersionConstraint};
use semver::Version;
use std::fmt;
use std::path::{Path, PathBuf};

/// Executables shipped in the cargo bin directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Cargo,
    Rustc,
    Rustup,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Cargo, Tool::Rustc, Tool::Rustup];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cargo => "cargo",
            Self::Rustc => "rustc",
            Self::Rustup => "rustup",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves toolchain executables to absolute paths
pub trait ToolchainLocator {
    fn locate(&self, tool: Tool) -> BuildResult<PathBuf>;
}

/// Finds tools inside one cargo bin directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoDirLocator {
    dir: PathBuf,
    host_os: HostOs,
}

impl CargoDirLocator {
    pub fn new(dir: impl Into<PathBuf>, host_os: HostOs) -> Self {
        Self {
            dir: dir.into(),
            host_os,
        }
    }

    /// Configured cargo dir, else `~/.cargo/bin`
    pub fn from_config(config: &BridgeConfig) -> BuildResult<Self> {
        let dir = match &config.cargo_dir {
            Some(dir) => dir.clone(),
            None => default_cargo_dir()?,
        };
        Ok(Self::new(dir, config.host_os))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Check that the directory and all three executables are usable
    pub fn validate(&self) -> BuildResult<()> {
        for tool in Tool::ALL {
            self.locate(tool)?;
        }
        Ok(())
    }
}

impl ToolchainLocator for CargoDirLocator {
    fn locate(&self, tool: Tool) -> BuildResult<PathBuf> {
        if !self.dir.is_dir() {
            return Err(BuildError::CargoDirNotFound(self.dir.clone()));
        }

        let path = self
            .dir
            .join(format!("{}{}", tool.name(), self.host_os.exe_suffix()));
        if !path.is_file() {
            return Err(BuildError::ExecutableNotFound(path));
        }
        if !is_executable(&path) {
            return Err(BuildError::NotExecutable(path));
        }
        Ok(path)
    }
}

fn default_cargo_dir() -> BuildResult<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        BuildError::CargoDirNotFound(PathBuf::from("~/.cargo/bin"))
    })?;
    Ok(home.join(".cargo").join("bin"))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Parse `rustc --version` output (`rustc 1.86.0 (05f9846f8 2025-03-31)`)
pub fn parse_rustc_version(output: &str) -> BuildResult<Version> {
    let unparsable = || BuildError::UnparsableVersion(output.trim().to_string());

    let line = output
        .lines()
        .map(str::trim)
        .find(|l| l.starts_with("rustc "))
        .ok_or_else(unparsable)?;
    let token = line.split_whitespace().nth(1).ok_or_else(unparsable)?;
    Version::parse(token).map_err(|_| unparsable())
}

/// Check the installed rustc against `constraint`.
///
/// Returns the found version, or `None` when no constraint is configured.
pub fn validate_version(
    constraint: Option<&VersionConstraint>,
    locator: &dyn ToolchainLocator,
    runner: &dyn CommandRunner,
    cwd: &Path,
) -> BuildResult<Option<Version>> {
    let Some(constraint) = constraint else {
        tracing::info!("no toolchain version specified, skipping validation");
        return Ok(None);
    };

    let rustc = locator.locate(Tool::Rustc)?;
    let invocation = runner.run(&rustc, &["--version"], cwd)?.check()?;
    let found = parse_rustc_version(&invocation.stdout)?;

    if !constraint.matches(&found) {
        return Err(BuildError::VersionMismatch {
            found: found.to_string(),
            required: constraint.to_string(),
        });
    }

    tracing::info!(found = %found, required = %constraint, "toolchain version accepted");
    Ok(Some(found))
}
