//! Target architecture configuration
//!
//! One [`ArchitectureConfig`] per requested native build output.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Well-known Android target triples
pub struct AndroidTarget;

impl AndroidTarget {
    pub const ARMV7_LINUX_ANDROIDEABI: &'static str = "armv7-linux-androideabi";
    pub const AARCH64_LINUX_ANDROID: &'static str = "aarch64-linux-android";
    pub const I686_LINUX_ANDROID: &'static str = "i686-linux-android";
    pub const X86_64_LINUX_ANDROID: &'static str = "x86_64-linux-android";

    pub const ALL: [&'static str; 4] = [
        Self::ARMV7_LINUX_ANDROIDEABI,
        Self::AARCH64_LINUX_ANDROID,
        Self::I686_LINUX_ANDROID,
        Self::X86_64_LINUX_ANDROID,
    ];
}

/// Operating system the build runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl HostOs {
    /// Detect the operating system of the current process
    pub fn current() -> Self {
        match std::env::consts::OS {
            "linux" => Self::Linux,
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            _ => Self::Other,
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Suffix appended to executable names
    pub fn exe_suffix(&self) -> &'static str {
        if self.is_windows() {
            ".exe"
        } else {
            ""
        }
    }

    /// Default archiver executable name
    pub fn default_ar(&self) -> &'static str {
        if self.is_windows() {
            "llvm-ar.exe"
        } else {
            "llvm-ar"
        }
    }

    /// Default NDK prebuilt toolchain directory for this host
    pub fn default_prebuilt(&self) -> Option<&'static str> {
        match self {
            Self::Linux => Some("linux-x86_64"),
            Self::MacOs => Some("darwin-x86_64"),
            Self::Windows => Some("windows-x86_64"),
            Self::Other => None,
        }
    }
}

/// Architecture configuration: a target triple plus the tools that link for it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ArchitectureConfig {
    /// Target triple (e.g. "aarch64-linux-android")
    pub target: String,

    /// Linker executable, relative to the NDK prebuilt dir when one is configured
    pub linker: String,

    /// Archiver executable (default: llvm-ar)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ar: Option<String>,
}

impl ArchitectureConfig {
    /// Create a new architecture config with the default archiver
    pub fn new(target: impl Into<String>, linker: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            linker: linker.into(),
            ar: None,
        }
    }

    /// Override the archiver
    pub fn with_ar(mut self, ar: impl Into<String>) -> Self {
        self.ar = Some(ar.into());
        self
    }

    /// Archiver to use on the given host
    pub fn ar_for(&self, host: HostOs) -> &str {
        self.ar.as_deref().unwrap_or_else(|| host.default_ar())
    }

    /// Linker name adjusted for the host (Windows NDK linkers are `.cmd` wrappers)
    pub fn linker_for(&self, host: HostOs) -> String {
        if host.is_windows() && !self.linker.ends_with(".cmd") {
            format!("{}.cmd", self.linker)
        } else {
            self.linker.clone()
        }
    }

    /// Validate the architecture entry
    pub fn validate(&self) -> ConfigResult<()> {
        if self.target.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "architectures.target".to_string(),
                reason: "target triple cannot be empty".to_string(),
            });
        }
        if self.target.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                field: "architectures.target".to_string(),
                reason: format!("'{}' is not a target triple", self.target),
            });
        }
        if self.linker.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("architectures.{}.linker", self.target),
                reason: "linker cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}
