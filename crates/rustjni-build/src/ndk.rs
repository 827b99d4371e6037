//! NDK prebuilt toolchain resolution

use crate::error::{BuildError, BuildResult};
use rustjni_config::{BridgeConfig, NdkSettings};
use std::path::PathBuf;

/// `bin` directory of the NDK LLVM prebuilt toolchain.
///
/// `None` when no NDK location is configured; linkers and archivers are then
/// used exactly as written.
pub fn prebuilt_bin_dir(config: &BridgeConfig) -> BuildResult<Option<PathBuf>> {
    let ndk = &config.ndk;
    if !ndk.is_configured() {
        tracing::debug!("no NDK configured, using linker paths verbatim");
        return Ok(None);
    }

    let root = ndk_root(ndk)?;
    let version = ndk
        .version
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or(BuildError::NdkVersionMissing)?;

    let versioned = root.join(version);
    if !versioned.is_dir() {
        return Err(BuildError::NdkVersionNotInstalled {
            version: version.to_string(),
            path: versioned,
        });
    }

    let prebuilt = match ndk.prebuilt.as_deref() {
        Some(prebuilt) => prebuilt,
        None => {
            let default = config
                .host_os
                .default_prebuilt()
                .ok_or(BuildError::UnsupportedHostOs)?;
            tracing::info!(prebuilt = default, "no 'prebuilt' specified, using the host default");
            default
        }
    };

    Ok(Some(
        versioned
            .join("toolchains")
            .join("llvm")
            .join("prebuilt")
            .join(prebuilt)
            .join("bin"),
    ))
}

/// `ndk.dir`, else `<sdk-dir>/ndk`, which must exist
fn ndk_root(ndk: &NdkSettings) -> BuildResult<PathBuf> {
    if let Some(dir) = &ndk.dir {
        return Ok(dir.clone());
    }

    let sdk_dir = ndk
        .sdk_dir
        .as_deref()
        .ok_or_else(|| BuildError::NdkNotFound("neither ndk.dir nor sdk-dir is set".to_string()))?;
    let candidate = sdk_dir.join("ndk");
    if !candidate.is_dir() {
        return Err(BuildError::NdkNotFound(format!(
            "ndk.dir not defined and no NDK directory found at: {}",
            candidate.display()
        )));
    }
    Ok(candidate)
}
