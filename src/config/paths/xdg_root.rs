//! XDG Base Directory utilities for the global config file.

use crate::error::FinderError;
use std::path::PathBuf;

const APP_DIR: &str = "typefinder";

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Result<PathBuf, FinderError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config_home));
    }

    let home = std::env::var("HOME").map_err(|_| {
        FinderError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".config"))
}

/// Path of the global config file, `$XDG_CONFIG_HOME/typefinder/config.toml`.
pub fn global_config_file() -> Result<PathBuf, FinderError> {
    Ok(config_home()?.join(APP_DIR).join("config.toml"))
}
