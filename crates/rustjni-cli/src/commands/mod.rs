pub mod build;
pub mod clean;
pub mod init;
pub mod sync;

use anyhow::{bail, Context, Result};
use rustjni_config::{BridgeConfig, ConfigLoader, PROJECT_CONFIG_FILE};
use std::path::Path;

/// Load the layered configuration for `project_dir` and resolve it
pub fn load_bridge(project_dir: &Path) -> Result<BridgeConfig> {
    let config = ConfigLoader::new()
        .load_from_directory(project_dir)
        .context("Failed to load configuration")?;

    if !config.is_project() {
        bail!(
            "No {} found in {} or any parent directory (run `rustjni init` first)",
            PROJECT_CONFIG_FILE,
            project_dir.display()
        );
    }

    config.bridge().context("Invalid configuration")
}
