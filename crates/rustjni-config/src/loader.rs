//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::bridge::BridgeConfig;
use crate::global::{GlobalConfig, GlobalNdkConfig, GlobalToolchainConfig};
use crate::project::{NdkConfig, ProjectConfig, ToolchainConfig};
use crate::{ConfigError, ConfigResult, PROJECT_CONFIG_FILE};
use std::env;
use std::path::{Path, PathBuf};

pub const ENV_CARGO_DIR: &str = "RUSTJNI_CARGO_DIR";
pub const ENV_NDK_DIR: &str = "RUSTJNI_NDK_DIR";
pub const ENV_NDK_VERSION: &str = "RUSTJNI_NDK_VERSION";
pub const ENV_PREBUILT: &str = "RUSTJNI_PREBUILT";
pub const ENV_TOOLCHAIN_VERSION: &str = "RUSTJNI_TOOLCHAIN_VERSION";

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Project config (./rustjni.toml) - lowest priority
/// 2. Machine-local config (~/.rustjni/config.toml) - overrides locations
/// 3. Environment variables (RUSTJNI_*) - overrides both
/// 4. CLI flags - highest priority (handled by caller)
pub struct ConfigLoader {
    /// Machine-local config path, resolved on first use
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Machine-local configuration
    pub global: GlobalConfig,

    /// Project root directory (where rustjni.toml was found)
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Use an explicit machine-local config path instead of ~/.rustjni/config.toml
    pub fn with_global_config_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find rustjni.toml, then loads the
    /// machine-local config if it exists and applies environment overrides.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project) = self.find_project_config(start_dir)?;
        tracing::debug!(root = ?project_root, "located project configuration");

        let global = self.load_global_config()?;
        let (project, global) = apply_env_overrides(project, global);

        Ok(Config {
            project,
            global,
            project_root,
        })
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project = ProjectConfig::load_from_file(config_path)?;
        let global = self.load_global_config()?;
        let (project, global) = apply_env_overrides(project, global);

        Ok(Config {
            project,
            global,
            project_root: config_path.parent().map(Path::to_path_buf),
        })
    }

    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, ProjectConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(PROJECT_CONFIG_FILE);

            if config_path.exists() {
                let project = ProjectConfig::load_from_file(&config_path)?;
                return Ok((Some(current), project));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, ProjectConfig::default())),
            }
        }
    }

    /// Load the machine-local configuration; absent file means defaults
    fn load_global_config(&mut self) -> ConfigResult<GlobalConfig> {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => match GlobalConfig::global_config_path() {
                Ok(path) => {
                    self.global_config_path = Some(path.clone());
                    path
                }
                Err(ConfigError::HomeNotFound) => return Ok(GlobalConfig::default()),
                Err(e) => return Err(e),
            },
        };

        if !path.exists() {
            return Ok(GlobalConfig::default());
        }

        GlobalConfig::load_from_file(&path)
    }

    /// Get the machine-local configuration directory (~/.rustjni)
    pub fn global_config_dir() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".rustjni"))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply RUSTJNI_* overrides
///
/// Location variables land in the machine-local layer, version variables in
/// the project layer, so each wins over the file-based value it replaces.
fn apply_env_overrides(
    mut project: ProjectConfig,
    mut global: GlobalConfig,
) -> (ProjectConfig, GlobalConfig) {
    if let Some(dir) = env_value(ENV_CARGO_DIR) {
        global
            .toolchain
            .get_or_insert_with(GlobalToolchainConfig::default)
            .cargo_dir = Some(PathBuf::from(dir));
    }

    if let Some(dir) = env_value(ENV_NDK_DIR) {
        global.ndk.get_or_insert_with(GlobalNdkConfig::default).dir = Some(PathBuf::from(dir));
    }

    if let Some(prebuilt) = env_value(ENV_PREBUILT) {
        global.ndk.get_or_insert_with(GlobalNdkConfig::default).prebuilt = Some(prebuilt);
    }

    if let Some(version) = env_value(ENV_NDK_VERSION) {
        project.ndk.get_or_insert_with(NdkConfig::default).version = Some(version);
    }

    if let Some(version) = env_value(ENV_TOOLCHAIN_VERSION) {
        project
            .toolchain
            .get_or_insert_with(ToolchainConfig::default)
            .version = Some(version);
    }

    (project, global)
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if this is a project (has rustjni.toml)
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }

    pub fn lib_name(&self) -> Option<&str> {
        self.project.lib_name()
    }

    /// Resolve the layered configuration into a [`BridgeConfig`]
    pub fn bridge(&self) -> ConfigResult<BridgeConfig> {
        let root = self
            .project_root
            .as_deref()
            .ok_or_else(|| ConfigError::NotFound(PathBuf::from(PROJECT_CONFIG_FILE)))?;
        BridgeConfig::resolve(&self.project, &self.global, root)
    }
}
