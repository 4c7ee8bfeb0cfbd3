//! Where the per-user config file lives.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::constants::APP_NAME;
use crate::error::{Error, Result};

/// Platform path of the user's `config.toml`.
///
/// Lives under `~/.config/uttera/` on Linux, the application-support
/// folder on macOS, and `%APPDATA%\uttera\` on Windows.
pub fn config_file_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", APP_NAME).ok_or(Error::NoConfigDir)?;
    Ok(dirs.config_dir().join("config.toml"))
}
