//! RustJNI build orchestration
//!
//! Drives the external Rust toolchain to turn the native project into one
//! shared library per configured architecture:
//! - toolchain discovery and version validation
//! - `.cargo/config.toml` generation with NDK linker paths
//! - native project scaffolding
//! - sequential cross-compilation and artifact collection
//!
//! All process execution goes through [`CommandRunner`] and all executable
//! lookup through [`ToolchainLocator`], so tests can swap both for fakes.

pub mod cargo_config;
pub mod error;
pub mod manifest;
pub mod ndk;
pub mod orchestrator;
pub mod process;
pub mod scaffold;
pub mod targets;
pub mod toolchain;

// Re-export main types
pub use error::{BuildError, BuildResult};
pub use manifest::NativeManifest;
pub use orchestrator::{BuildReport, BuildStats, CleanStats, Orchestrator};
pub use process::{CommandRunner, Invocation, SystemRunner};
pub use scaffold::ScaffoldOutcome;
pub use targets::{abi_dir, ArtifactMetadata, BuildArtifact};
pub use toolchain::{CargoDirLocator, Tool, ToolchainLocator};
