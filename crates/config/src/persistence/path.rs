//! Path helpers for configuration file locations.

use std::path::PathBuf;

use anyhow::Context;

use crate::constants::APP_NAME;

/// Returns the default path to the configuration file.
///
/// - Linux: `~/.config/cloudlogs-dashboard/config.json`
/// - macOS: `~/Library/Application Support/cloudlogs-dashboard/config.json`
/// - Windows: `%AppData%\cloudlogs-dashboard\config\config.json`
pub fn default_config_path() -> Result<PathBuf, anyhow::Error> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.config_dir().join("config.json"))
}
