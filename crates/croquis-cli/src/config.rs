//! Configuration file loading for the CLI
//!
//! This module handles finding, loading and validating TOML configuration
//! files from various locations (explicit path, local directory, system
//! directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use croquis::{CroquisError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for CroquisError {
    fn from(err: ConfigError) -> Self {
        CroquisError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (croquis/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - Config values are out of range or name invalid colors
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CroquisError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("croquis/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "croquis", "croquis") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, CroquisError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate().map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "[canvas]\nseed = 9\n[export]\nlabels = false\n");

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.canvas().seed(), Some(9));
        assert!(!config.export().labels());
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, CroquisError::Config(ref msg) if msg.contains("Missing configuration file")));
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "[canvas\n");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, CroquisError::Config(ref msg) if msg.starts_with("Failed to parse")));
    }

    #[test]
    fn test_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "[style]\nroad_fill = \"not-a-color\"\n");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, CroquisError::Config(ref msg) if msg.starts_with("Validation error")));
    }
}
