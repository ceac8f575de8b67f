//! Configuration file discovery for the CLI.
//!
//! A TOML configuration is looked up in order: the `--config` path, the
//! local `lineage/config.toml`, then the platform configuration directory.
//! Without any file the defaults apply.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use lineage::{LineageError, config::AppConfig};

const LOCAL_CONFIG_PATH: &str = "lineage/config.toml";

/// Configuration-related errors for the CLI.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid configuration {path}: {message}")]
    Validation { path: PathBuf, message: String },
}

impl From<ConfigError> for LineageError {
    fn from(err: ConfigError) -> Self {
        LineageError::Config(err.to_string())
    }
}

/// Finds and loads the configuration.
///
/// # Errors
///
/// Returns an error if an explicit path is given but does not exist, or if
/// the file that was found cannot be read, parsed or validated.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, LineageError> {
    if let Some(path) = explicit_path {
        return load_config_file(path.as_ref());
    }

    match discover() {
        Some(path) => load_config_file(&path),
        None => {
            debug!("No configuration file, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// First existing file among the local and platform locations.
fn discover() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_PATH);
    if local.is_file() {
        return Some(local);
    }

    let Some(dirs) = ProjectDirs::from("com", "lineage", "lineage") else {
        debug!("No platform configuration directory");
        return None;
    };
    let platform = dirs.config_dir().join("config.toml");
    if platform.is_file() {
        return Some(platform);
    }
    debug!(path = platform.display().to_string(); "No platform configuration file");
    None
}

fn load_config_file(path: &Path) -> Result<AppConfig, LineageError> {
    info!(path = path.display().to_string(); "Loading configuration");
    if !path.is_file() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    config
        .validate()
        .map_err(|message| ConfigError::Validation {
            path: path.to_path_buf(),
            message,
        })?;

    debug!(config:?; "Configuration loaded");
    Ok(config)
}
