//! Reading and writing the TOML config file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};

/// Read the TOML config at `path`.
///
/// A missing file is not an error; defaults apply until the user runs
/// `config init`.
pub fn read_config(path: &Path) -> Result<Config> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            return Err(Error::ConfigLoad {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str(&raw).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read the config from the platform config path.
///
/// Degrades to defaults when the platform has no config directory, so
/// stripped-down environments still work.
pub fn load_user_config() -> Result<Config> {
    match super::config_file_path() {
        Ok(path) => read_config(&path),
        Err(_) => Ok(Config::default()),
    }
}

/// Write `config` as pretty TOML, creating parent directories as needed.
pub fn write_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| Error::ConfigSave {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let rendered =
        toml::to_string_pretty(config).map_err(|source| Error::ConfigEncode { source })?;

    std::fs::write(path, rendered).map_err(|source| Error::ConfigSave {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `config` to the platform config path and return that path.
pub fn save_user_config(config: &Config) -> Result<PathBuf> {
    let path = super::config_file_path()?;
    write_config(config, &path)?;
    Ok(path)
}
