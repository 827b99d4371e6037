//! RustJNI Configuration System
//!
//! Provides configuration management for RustJNI projects including:
//! - Project configuration (rustjni.toml)
//! - Machine-local configuration (~/.rustjni/config.toml)
//! - Environment variable overrides
//! - The resolved, immutable [`BridgeConfig`] handed to every other component
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Project config (./rustjni.toml)
//! 2. Machine-local config (~/.rustjni/config.toml)
//! 3. Environment variables (RUSTJNI_*)
//! 4. CLI flags
//!
//! # Example
//!
//! ```no_run
//! use rustjni_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! let bridge = config.bridge().unwrap();
//! println!("building {}", bridge.lib_name);
//! ```

pub mod arch;
pub mod bridge;
pub mod class_name;
pub mod global;
pub mod loader;
pub mod project;
pub mod version;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Missing required setting '{field}'")]
    MissingField { field: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Invalid library version: {0}")]
    InvalidVersion(String),

    #[error("Invalid toolchain version constraint '{constraint}': {reason}")]
    InvalidConstraint { constraint: String, reason: String },

    #[error("Invalid bridge-host class name '{0}'")]
    InvalidClassName(String),

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Name of the project configuration file
pub const PROJECT_CONFIG_FILE: &str = "rustjni.toml";

// Re-export main types
pub use arch::{AndroidTarget, ArchitectureConfig, HostOs};
pub use bridge::{BridgeConfig, NdkSettings, Visibility};
pub use class_name::ClassName;
pub use global::GlobalConfig;
pub use loader::{Config, ConfigLoader};
pub use project::ProjectConfig;
pub use version::VersionConstraint;
