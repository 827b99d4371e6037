//! Resolved bridge configuration
//!
//! [`BridgeConfig`] is built once from the loaded configuration layers and
//! then only ever borrowed. Every path in it is absolute (joined onto the
//! project root).

use crate::arch::{ArchitectureConfig, HostOs};
use crate::class_name::ClassName;
use crate::global::GlobalConfig;
use crate::project::ProjectConfig;
use crate::version::VersionConstraint;
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_LIB_NAME: &str = "my_rust_lib";
pub const DEFAULT_LIB_VERSION: &str = "0.1.0";
pub const DEFAULT_NATIVE_PATH: &str = "./rust";
pub const DEFAULT_OUTPUT_DIR: &str = "build/rust";
pub const DEFAULT_SOURCE_DIRS: [&str; 2] = ["src/main/java", "src/main/kotlin"];

/// Visibility modifier written in front of generated host declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
    /// Omit the modifier and take the language default
    #[default]
    Default,
}

impl Visibility {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Default => "",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// NDK location settings after layering
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NdkSettings {
    pub dir: Option<PathBuf>,
    pub sdk_dir: Option<PathBuf>,
    pub version: Option<String>,
    pub prebuilt: Option<String>,
}

impl NdkSettings {
    /// Whether any NDK location was configured at all
    pub fn is_configured(&self) -> bool {
        self.dir.is_some() || self.sdk_dir.is_some()
    }
}

/// Immutable configuration consumed by the synchronization engine and the
/// toolchain orchestrator
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    pub lib_name: String,
    pub lib_version: String,
    pub project_root: PathBuf,
    /// Native project root (directory holding the native Cargo.toml)
    pub native_root: PathBuf,
    pub host_class: Option<ClassName>,
    pub visibility: Visibility,
    pub export_functions: bool,
    pub source_dirs: Vec<PathBuf>,
    pub toolchain_version: Option<VersionConstraint>,
    pub cargo_dir: Option<PathBuf>,
    pub ndk: NdkSettings,
    pub output_dir: PathBuf,
    pub architectures: Vec<ArchitectureConfig>,
    pub host_os: HostOs,
}

impl BridgeConfig {
    /// Defaults rooted at `project_root`
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            lib_name: DEFAULT_LIB_NAME.to_string(),
            lib_version: DEFAULT_LIB_VERSION.to_string(),
            native_root: project_root.join(DEFAULT_NATIVE_PATH),
            host_class: None,
            visibility: Visibility::Default,
            export_functions: true,
            source_dirs: DEFAULT_SOURCE_DIRS
                .iter()
                .map(|d| project_root.join(d))
                .collect(),
            toolchain_version: None,
            cargo_dir: None,
            ndk: NdkSettings::default(),
            output_dir: project_root.join(DEFAULT_OUTPUT_DIR),
            architectures: Vec::new(),
            host_os: HostOs::current(),
            project_root,
        }
    }

    /// Resolve the layered configuration into a bridge configuration
    pub fn resolve(
        project: &ProjectConfig,
        global: &GlobalConfig,
        project_root: &Path,
    ) -> ConfigResult<Self> {
        let mut config = Self::new(project_root);

        if let Some(lib) = &project.library {
            if let Some(name) = &lib.name {
                config.lib_name = name.clone();
            }
            if let Some(version) = &lib.version {
                config.lib_version = version.clone();
            }
            if let Some(path) = &lib.path {
                config.native_root = project_root.join(path);
            }
        }

        if let Some(bridge) = &project.bridge {
            config.host_class = bridge.host.as_deref().map(ClassName::parse).transpose()?;
            config.visibility = bridge.visibility.unwrap_or_default();
            config.export_functions = bridge.export_functions.unwrap_or(true);
            if !bridge.source_dirs.is_empty() {
                config.source_dirs = bridge
                    .source_dirs
                    .iter()
                    .map(|d| project_root.join(d))
                    .collect();
            }
        }

        if let Some(toolchain) = &project.toolchain {
            config.toolchain_version = toolchain
                .version
                .as_deref()
                .map(str::parse)
                .transpose()?;
            config.cargo_dir = toolchain.cargo_dir.clone();
        }
        if let Some(cargo_dir) = global.cargo_dir() {
            config.cargo_dir = Some(cargo_dir.to_path_buf());
        }

        if let Some(ndk) = &project.ndk {
            config.ndk = NdkSettings {
                dir: ndk.dir.clone(),
                sdk_dir: ndk.sdk_dir.clone(),
                version: ndk.version.clone(),
                prebuilt: ndk.prebuilt.clone(),
            };
        }
        if let Some(local) = &global.ndk {
            if local.dir.is_some() {
                config.ndk.dir = local.dir.clone();
            }
            if local.sdk_dir.is_some() {
                config.ndk.sdk_dir = local.sdk_dir.clone();
            }
            if let Some(prebuilt) = &local.prebuilt {
                if config.ndk.prebuilt.is_some() {
                    tracing::warn!(
                        prebuilt = %prebuilt,
                        "machine-local 'prebuilt' overrides the value in rustjni.toml"
                    );
                }
                config.ndk.prebuilt = Some(prebuilt.clone());
            }
        }

        if let Some(dir) = project.output.as_ref().and_then(|o| o.dir.as_ref()) {
            config.output_dir = project_root.join(dir);
        }

        config.architectures = project.architectures.clone();
        Ok(config)
    }

    /// The bridge-host class; a configuration error when unset
    pub fn require_host_class(&self) -> ConfigResult<&ClassName> {
        self.host_class.as_ref().ok_or_else(|| ConfigError::MissingField {
            field: "bridge.host".to_string(),
        })
    }

    /// Fail when no architecture was configured
    pub fn require_architectures(&self) -> ConfigResult<&[ArchitectureConfig]> {
        if self.architectures.is_empty() {
            return Err(ConfigError::ValidationError(
                "no architectures specified in rustjni.toml".to_string(),
            ));
        }
        Ok(&self.architectures)
    }

    pub fn with_host_class(mut self, class: ClassName) -> Self {
        self.host_class = Some(class);
        self
    }

    pub fn with_lib_name(mut self, name: impl Into<String>) -> Self {
        self.lib_name = name.into();
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_architectures(mut self, architectures: Vec<ArchitectureConfig>) -> Self {
        self.architectures = architectures;
        self
    }

    pub fn with_cargo_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cargo_dir = Some(dir.into());
        self
    }

    pub fn with_host_os(mut self, host_os: HostOs) -> Self {
        self.host_os = host_os;
        self
    }
}
