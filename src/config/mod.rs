//! Configuration schema, loading, and validation.

mod file;
mod paths;
mod types;
mod validate;

pub use file::{load_user_config, read_config, save_user_config, write_config};
pub use paths::config_file_path;
pub use types::{
    Config, DetectionConfig, DetectionMode, FiltersConfig, OutputConfig, OutputFormat,
};
pub use validate::validate_config;
