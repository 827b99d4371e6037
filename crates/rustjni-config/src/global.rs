//! Machine-local Configuration (~/.rustjni/config.toml)
//!
//! Holds settings that differ per machine rather than per project: where the
//! cargo toolchain and the Android NDK are installed.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Machine-local configuration from ~/.rustjni/config.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// Toolchain location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolchain: Option<GlobalToolchainConfig>,

    /// NDK location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ndk: Option<GlobalNdkConfig>,
}

/// Toolchain location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct GlobalToolchainConfig {
    /// Directory holding cargo, rustc and rustup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo_dir: Option<PathBuf>,
}

/// NDK location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct GlobalNdkConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdk_dir: Option<PathBuf>,

    /// Overrides the project's prebuilt setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prebuilt: Option<String>,
}

impl GlobalConfig {
    /// Load machine-local configuration from a file
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

    /// Validate the machine-local configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(prebuilt) = self.ndk.as_ref().and_then(|n| n.prebuilt.as_deref()) {
            if prebuilt.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "ndk.prebuilt".to_string(),
                    reason: "prebuilt cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Get the machine-local config file path (~/.rustjni/config.toml)
    pub fn global_config_path() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".rustjni").join("config.toml"))
    }

    pub fn cargo_dir(&self) -> Option<&Path> {
        self.toolchain.as_ref().and_then(|t| t.cargo_dir.as_deref())
    }

    pub fn prebuilt(&self) -> Option<&str> {
        self.ndk.as_ref().and_then(|n| n.prebuilt.as_deref())
    }

    /// Merge another config into this one
    /// Other config takes precedence for non-None values
    pub fn merge(&mut self, other: &GlobalConfig) {
        if other.toolchain.is_some() {
            self.toolchain = other.toolchain.clone();
        }
        if other.ndk.is_some() {
            self.ndk = other.ndk.clone();
        }
    }
}
