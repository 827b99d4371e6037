/// Target triples, output layout and collected artifacts
use crate::error::{BuildError, BuildResult};
use rustjni_config::AndroidTarget;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Apple triple that gets an ABI-style directory name
pub const APPLE_IOS_ARM64: &str = "aarch64-apple-ios";

/// Output directory name for a target triple
pub fn abi_dir(target: &str) -> String {
    match target {
        AndroidTarget::ARMV7_LINUX_ANDROIDEABI => "armeabi-v7a".to_string(),
        AndroidTarget::AARCH64_LINUX_ANDROID => "arm64-v8a".to_string(),
        AndroidTarget::I686_LINUX_ANDROID => "x86".to_string(),
        AndroidTarget::X86_64_LINUX_ANDROID => "x86_64".to_string(),
        APPLE_IOS_ARM64 => "ios-arm64".to_string(),
        other => other.replace('-', "_"),
    }
}

/// Shared-library extension (without the dot) for a target triple
pub fn library_extension(target: &str) -> &'static str {
    if target.contains("apple-ios") {
        "dylib"
    } else {
        "so"
    }
}

/// File name cargo gives the shared library of `lib_name`
pub fn library_file_name(lib_name: &str, target: &str) -> String {
    format!(
        "lib{}.{}",
        lib_name.replace('-', "_"),
        library_extension(target)
    )
}

/// Where cargo leaves the release library for `target`
pub fn compiled_library_path(native_root: &Path, lib_name: &str, target: &str) -> PathBuf {
    native_root
        .join("target")
        .join(target)
        .join("release")
        .join(library_file_name(lib_name, target))
}

/// A shared library copied into the output tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildArtifact {
    /// Target triple that produced it
    pub target: String,
    /// Output directory name (`arm64-v8a`, ...)
    pub abi: String,
    /// Compiled library inside the native project
    pub source: PathBuf,
    /// Copy inside the output directory
    pub output_path: PathBuf,
    pub metadata: ArtifactMetadata,
}

impl BuildArtifact {
    /// Copy `source` to `output_path` and record the result.
    ///
    /// A missing source is fatal: cargo reported success, so the library
    /// must be there.
    pub fn collect(target: &str, source: PathBuf, output_path: PathBuf) -> BuildResult<Self> {
        if !source.is_file() {
            return Err(BuildError::ArtifactNotFound {
                target: target.to_string(),
                path: source,
            });
        }

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
        }
        fs::copy(&source, &output_path).map_err(|e| BuildError::io(&output_path, e))?;

        let metadata = ArtifactMetadata::from_file(&output_path)?;
        Ok(Self {
            target: target.to_string(),
            abi: abi_dir(target),
            source,
            output_path,
            metadata,
        })
    }

    /// Get the artifact size in bytes
    pub fn size(&self) -> u64 {
        self.metadata.size
    }
}

/// Metadata about a collected artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub size: u64,
    /// Hex SHA-256 of the copied file
    pub sha256: String,
    /// Collection timestamp
    #[serde(with = "serde_millis")]
    pub collected_at: std::time::SystemTime,
}

impl ArtifactMetadata {
    pub fn from_file(path: &Path) -> BuildResult<Self> {
        let bytes = fs::read(path).map_err(|e| BuildError::io(path, e))?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);

        Ok(Self {
            size: bytes.len() as u64,
            sha256: format!("{:x}", hasher.finalize()),
            collected_at: std::time::SystemTime::now(),
        })
    }
}

/// Helper module for serde SystemTime serialization
mod serde_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    pub fn serialize<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let duration = time
            .duration_since(UNIX_EPOCH)
            .unwrap_or_else(|_| Duration::from_secs(0));
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SystemTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(UNIX_EPOCH + Duration::from_millis(millis))
    }
}
