//! XDG path resolution for the switchyard settings file.

use anyhow::Result;
use std::path::PathBuf;

use super::types::Settings;

impl Settings {
    /// Returns the platform-specific configuration directory for switchyard.
    ///
    /// Returns `~/.config/switchyard/` on Linux (`XDG_CONFIG_HOME/switchyard`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform's config directory cannot be determined.
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join(crate::constants::APP_NAME);
        Ok(dir)
    }

    /// Returns the settings file path: `SWITCHYARD_CONFIG` when set,
    /// otherwise `~/.config/switchyard/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(explicit) = std::env::var_os(crate::constants::CONFIG_PATH_ENV) {
            if !explicit.is_empty() {
                return Ok(PathBuf::from(explicit));
            }
        }
        Ok(Self::config_dir()?.join(crate::constants::CONFIG_FILENAME))
    }
}
