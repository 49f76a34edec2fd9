pub mod batch;
pub mod config;
pub mod parse;

use std::path::{Path, PathBuf};

use vitalnote_core::models::config::VitalNoteConfig;

/// Location of the user config file when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vitalnote")
        .join("config.json")
}

/// Load the config named by `--config`, or defaults when none was given.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<VitalNoteConfig> {
    match config_path {
        Some(path) => Ok(VitalNoteConfig::from_file(Path::new(path))?),
        None => Ok(VitalNoteConfig::default()),
    }
}
