//! `.cargo/config.toml` generation
//!
//! The native project's cargo config carries one generated block with a
//! `[target.<triple>]` table per architecture. Anything outside the block
//! belongs to the user and is written back as found.

use crate::error::{BuildError, BuildResult};
use rustjni_config::{ArchitectureConfig, HostOs};
use rustjni_reflect::{Markers, SourceLayout};
use std::fs;
use std::path::{Path, PathBuf};

/// Header line inside the generated block
pub const CONFIG_HEADER: &str = "#auto-generated code";

/// Location of the cargo config inside the native project
pub fn config_path(native_root: &Path) -> PathBuf {
    native_root.join(".cargo").join("config.toml")
}

/// Prefix joined in front of linker and archiver names
fn tool_prefix(prebuilt: Option<&Path>, host_os: HostOs) -> String {
    let Some(dir) = prebuilt else {
        return String::new();
    };

    let mut prefix = dir.display().to_string();
    if !prefix.ends_with(['/', '\\']) {
        prefix.push(std::path::MAIN_SEPARATOR);
    }
    if host_os.is_windows() {
        // Backslashes must be escaped inside TOML basic strings
        prefix = prefix.replace('\\', "\\\\");
    }
    prefix
}

/// Render the generated block for `architectures`
pub fn render_block(
    architectures: &[ArchitectureConfig],
    prebuilt: Option<&Path>,
    host_os: HostOs,
) -> String {
    let prefix = tool_prefix(prebuilt, host_os);

    let mut lines = vec![CONFIG_HEADER.to_string(), String::new()];
    for arch in architectures {
        lines.push(format!("[target.{}]", arch.target));
        lines.push(format!("ar = \"{prefix}{}\"", arch.ar_for(host_os)));
        lines.push(format!("linker = \"{prefix}{}\"", arch.linker_for(host_os)));
        lines.push(String::new());
    }

    Markers::HASH.wrap(&lines.join("\n"))
}

/// Replace the generated block in `existing`, or append one; everything
/// outside the markers is kept byte for byte
pub fn merge(existing: &str, block: &str) -> String {
    match Markers::HASH.locate(existing) {
        SourceLayout::Blocked(parts) => parts.with_block(block),
        SourceLayout::Plain(text) => {
            let mut out = text.to_string();
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(block);
            out.push('\n');
            out
        }
    }
}

/// Write the cargo config for `architectures`, keeping user content
pub fn write_config(
    native_root: &Path,
    architectures: &[ArchitectureConfig],
    prebuilt: Option<&Path>,
    host_os: HostOs,
) -> BuildResult<PathBuf> {
    let path = config_path(native_root);
    let existing = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(BuildError::io(&path, e)),
    };

    let content = merge(&existing, &render_block(architectures, prebuilt, host_os));
    if content == existing {
        tracing::debug!(file = %path.display(), "cargo config unchanged");
        return Ok(path);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
    }
    fs::write(&path, content).map_err(|e| BuildError::io(&path, e))?;
    tracing::info!(file = %path.display(), architectures = architectures.len(), "wrote cargo config");
    Ok(path)
}
