/// Reflection and synchronization error types
use rustjni_config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

pub type ReflectResult<T> = Result<T, ReflectError>;

#[derive(Debug, Error)]
pub enum ReflectError {
    #[error("Could not find source file for class '{class}' (searched: {})", display_paths(.searched))]
    HostFileNotFound { class: String, searched: Vec<PathBuf> },

    #[error("Could not find class definition for '{class}' in {file}")]
    ClassDeclarationNotFound { class: String, file: PathBuf },

    #[error("Could not find native source file at {0}")]
    NativeSourceNotFound(PathBuf),

    #[error(
        "Method \"{method}\" is already defined with the same parameters but a different return type \
         (host: {host_return}, native: {native_return})"
    )]
    SignatureConflict {
        method: String,
        host_return: String,
        native_return: String,
    },

    #[error("Failed to parse native manifest at {path}: {error}")]
    ManifestParse {
        path: PathBuf,
        error: toml::de::Error,
    },

    #[error("I/O error at {path}: {error}")]
    IoError {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ReflectError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            error,
        }
    }

    /// Create a signature conflict error
    pub fn conflict(
        method: impl Into<String>,
        host_return: impl Into<String>,
        native_return: impl Into<String>,
    ) -> Self {
        Self::SignatureConflict {
            method: method.into(),
            host_return: host_return.into(),
            native_return: native_return.into(),
        }
    }

    /// Whether this error stems from a host/native return type mismatch
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::SignatureConflict { .. })
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
