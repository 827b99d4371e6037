//! Project Configuration (rustjni.toml)
//!
//! Handles project-level configuration stored in `rustjni.toml` at the project root.

use crate::arch::ArchitectureConfig;
use crate::bridge::Visibility;
use crate::class_name::ClassName;
use crate::version::VersionConstraint;
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration from rustjni.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Native library metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<LibraryConfig>,

    /// Bridge-host class settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bridge: Option<BridgeSection>,

    /// Toolchain requirements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolchain: Option<ToolchainConfig>,

    /// Android NDK location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ndk: Option<NdkConfig>,

    /// Artifact output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,

    /// Target architectures, compiled in order
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub architectures: Vec<ArchitectureConfig>,
}

/// Native library metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Library name (package name in the native Cargo.toml)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Library version, only used when scaffolding the native project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Native project root relative to the project root (default: "./rust")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Bridge-host class settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct BridgeSection {
    /// Fully-qualified class holding the external declarations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Visibility modifier for generated declarations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,

    /// Whether declarations are generated at all (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_functions: Option<bool>,

    /// Host source roots searched for the class file
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_dirs: Vec<PathBuf>,
}

/// Toolchain requirements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ToolchainConfig {
    /// Required compiler version (exact, >=, or wildcard)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Directory holding cargo, rustc and rustup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo_dir: Option<PathBuf>,
}

/// Android NDK location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct NdkConfig {
    /// NDK root holding versioned NDK directories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// SDK root; `<sdk-dir>/ndk` is used when `dir` is unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdk_dir: Option<PathBuf>,

    /// NDK version directory name (e.g. "26.1.10909125")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Prebuilt toolchain host directory (e.g. "linux-x86_64")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prebuilt: Option<String>,
}

/// Artifact output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output root for per-architecture directories (default: "build/rust")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl ProjectConfig {
    /// Load project configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the project configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(lib) = &self.library {
            if let Some(name) = &lib.name {
                if !is_valid_lib_name(name) {
                    return Err(ConfigError::InvalidValue {
                        field: "library.name".to_string(),
                        reason: format!(
                            "'{}' must be non-empty and contain only letters, digits, '_' or '-'",
                            name
                        ),
                    });
                }
            }

            if let Some(version) = &lib.version {
                if !is_valid_version(version) {
                    return Err(ConfigError::InvalidVersion(version.clone()));
                }
            }
        }

        if let Some(bridge) = &self.bridge {
            if let Some(host) = &bridge.host {
                ClassName::parse(host)?;
            }
        }

        if let Some(version) = self.toolchain.as_ref().and_then(|t| t.version.as_deref()) {
            version.parse::<VersionConstraint>()?;
        }

        for arch in &self.architectures {
            arch.validate()?;
        }

        Ok(())
    }

    /// Get the library name, if present
    pub fn lib_name(&self) -> Option<&str> {
        self.library.as_ref().and_then(|l| l.name.as_deref())
    }

    /// Get the configured bridge-host class, if present
    pub fn host_class(&self) -> Option<&str> {
        self.bridge.as_ref().and_then(|b| b.host.as_deref())
    }

    /// Merge another project config into this one
    /// Other config takes precedence for non-None values
    pub fn merge(&mut self, other: &ProjectConfig) {
        if other.library.is_some() {
            self.library = other.library.clone();
        }
        if other.bridge.is_some() {
            self.bridge = other.bridge.clone();
        }
        if other.toolchain.is_some() {
            self.toolchain = other.toolchain.clone();
        }
        if other.ndk.is_some() {
            self.ndk = other.ndk.clone();
        }
        if other.output.is_some() {
            self.output = other.output.clone();
        }
        if !other.architectures.is_empty() {
            self.architectures = other.architectures.clone();
        }
    }
}

/// Basic semver validation (simplified)
fn is_valid_version(version: &str) -> bool {
    if version.is_empty() {
        return false;
    }

    // Split on '-' or '+' to separate version from pre-release/build
    let main_version = version.split(['-', '+']).next().unwrap_or("");

    if main_version.is_empty() {
        return false;
    }

    // Main version should be X.Y or X.Y.Z where X, Y, Z are digits
    let parts: Vec<&str> = main_version.split('.').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return false;
    }

    parts
        .iter()
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}

/// Library names end up in `lib<name>.so` and in the load call
fn is_valid_lib_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
