/// Build orchestration error types
use rustjni_config::ConfigError;
use rustjni_reflect::ReflectError;
use std::path::PathBuf;
use thiserror::Error;

pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Cargo directory does not exist: {0}")]
    CargoDirNotFound(PathBuf),

    #[error("Executable not found at: {0}")]
    ExecutableNotFound(PathBuf),

    #[error("Toolchain executable is not executable: {0}")]
    NotExecutable(PathBuf),

    #[error("Failed to launch {tool}: {error}")]
    ToolLaunch {
        tool: String,
        error: std::io::Error,
    },

    #[error("{tool} command failed with exit code {}{}", display_code(.exit_code), display_output(.output))]
    ToolFailed {
        tool: String,
        exit_code: Option<i32>,
        output: String,
    },

    #[error("Could not read a version from rustc output: {0:?}")]
    UnparsableVersion(String),

    #[error("Rust version {found} does not satisfy required version {required}")]
    VersionMismatch { found: String, required: String },

    #[error("No NDK found: {0}")]
    NdkNotFound(String),

    #[error("NDK location is configured but 'ndk.version' is not set")]
    NdkVersionMissing,

    #[error("NDK {version} is not available in the path: {}", .path.display())]
    NdkVersionNotInstalled { version: String, path: PathBuf },

    #[error("No default NDK prebuilt directory for this operating system; set 'ndk.prebuilt'")]
    UnsupportedHostOs,

    #[error("Compiled library for {target} not found: {}", .path.display())]
    ArtifactNotFound { target: String, path: PathBuf },

    #[error("Failed to render native manifest: {0}")]
    ManifestRender(#[from] toml::ser::Error),

    #[error("Failed to render build report: {0}")]
    ReportRender(#[from] serde_json::Error),

    #[error("I/O error at {}: {error}", .path.display())]
    IoError {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Reflect(#[from] ReflectError),
}

impl BuildError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            error,
        }
    }

    /// Create a failed tool invocation error
    pub fn tool_failed(tool: impl Into<String>, exit_code: Option<i32>, output: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            exit_code,
            output: output.into(),
        }
    }
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "(terminated by signal)".to_string(), |c| c.to_string())
}

fn display_output(output: &str) -> String {
    if output.trim().is_empty() {
        String::new()
    } else {
        format!("\n{}", output.trim_end())
    }
}
