//! `datasynth.toml` handling.

mod atomic;
mod settings;

pub use settings::{DEFAULT_CONFIG_FILE, Settings, load_settings, save_settings};

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("config file already exists: {} (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
