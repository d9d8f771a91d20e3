//! File system persistence for settings
//!
//! This module handles reading and writing config files with:
//! - Format selection by extension (`.json` or TOML)
//! - Atomic writes (no partial/corrupted template files)
//! - Directory creation

use crate::{ConfigError, ConfigResult, Settings};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// On-disk format of a config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Picks the format from a file extension; anything but `.json` is TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Handles config file persistence
pub struct ConfigPersistence {
    config_path: PathBuf,
    format: ConfigFormat,
}

impl ConfigPersistence {
    /// Creates a new persistence handler for the given config file path
    pub fn new(config_path: PathBuf) -> Self {
        let format = ConfigFormat::from_path(&config_path);
        Self {
            config_path,
            format,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    /// Reads and parses the config file without validating it
    ///
    /// An empty or whitespace-only file is treated as corrupted.
    pub fn read(&self) -> ConfigResult<Settings> {
        let contents =
            fs::read_to_string(&self.config_path).map_err(|e| ConfigError::ReadError {
                path: self.config_path.clone(),
                source: e,
            })?;

        if contents.trim().is_empty() {
            return Err(ConfigError::ReadError {
                path: self.config_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "Config file is empty or contains only whitespace",
                ),
            });
        }

        match self.format {
            ConfigFormat::Toml => {
                toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                    path: self.config_path.clone(),
                    source: e,
                })
            }
            ConfigFormat::Json => {
                serde_json::from_str(&contents).map_err(|e| ConfigError::JsonParseError {
                    path: self.config_path.clone(),
                    source: e,
                })
            }
        }
    }

    /// Writes settings to the config file atomically
    ///
    /// Validation is not applied: the template written on first start is
    /// intentionally incomplete.
    pub fn write(&self, settings: &Settings) -> ConfigResult<()> {
        if let Some(parent) = self.config_path.parent() {
            self.ensure_directory_exists(parent)?;
        }

        let contents = self.serialize(settings)?;
        let temp_file = self.create_temp_file()?;
        self.write_atomic(temp_file, &contents)?;

        log::debug!("Config written to {}", self.config_path.display());
        Ok(())
    }

    /// Writes the template settings, replacing any existing file
    pub fn write_template(&self) -> ConfigResult<()> {
        self.write(&Settings::template())?;
        log::info!("Generated template config at {}", self.config_path.display());
        Ok(())
    }

    fn serialize(&self, settings: &Settings) -> ConfigResult<String> {
        match self.format {
            ConfigFormat::Toml => Ok(toml::to_string_pretty(settings)?),
            ConfigFormat::Json => Ok(serde_json::to_string_pretty(settings)?),
        }
    }

    /// Ensures a directory exists, creating it if necessary
    fn ensure_directory_exists(&self, path: &Path) -> ConfigResult<()> {
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path).map_err(|e| ConfigError::DirectoryCreationError {
                path: path.to_path_buf(),
                source: e,
            })?;
            log::info!("Created config directory: {}", path.display());
        }
        Ok(())
    }

    /// Creates a temporary file in the same directory as the config file
    fn create_temp_file(&self) -> ConfigResult<NamedTempFile> {
        let dir = match self.config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        NamedTempFile::new_in(dir).map_err(ConfigError::IoError)
    }

    /// Writes content to a temporary file and atomically renames it
    fn write_atomic(&self, mut temp_file: NamedTempFile, content: &str) -> ConfigResult<()> {
        temp_file
            .write_all(content.as_bytes())
            .map_err(ConfigError::IoError)?;

        temp_file.flush().map_err(ConfigError::IoError)?;

        temp_file
            .persist(&self.config_path)
            .map_err(|e| ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e.error,
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir(file_name: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join(file_name);
        (temp_dir, config_path)
    }

    fn valid_settings() -> Settings {
        Settings::new("http://plex:32400", "token").expect("valid settings")
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a.JSON")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), ConfigFormat::Toml);
    }

    #[test]
    fn test_write_and_read_toml() {
        let (_temp_dir, config_path) = setup_test_dir("plex-cleanup.toml");
        let persistence = ConfigPersistence::new(config_path);

        let mut settings = valid_settings();
        settings.collection_size_minimum = 4;
        persistence.write(&settings).expect("Should write");

        let loaded = persistence.read().expect("Should read");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_write_and_read_json() {
        let (_temp_dir, config_path) = setup_test_dir("plex-cleanup.json");
        let persistence = ConfigPersistence::new(config_path.clone());

        persistence.write(&valid_settings()).expect("Should write");

        let raw = fs::read_to_string(&config_path).expect("Should read raw");
        assert!(raw.trim_start().starts_with('{'));
        assert_eq!(persistence.read().expect("Should read"), valid_settings());
    }

    #[test]
    fn test_write_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("plex-cleanup.toml");
        let persistence = ConfigPersistence::new(config_path.clone());

        persistence.write_template().expect("Should write template");
        assert!(config_path.exists());
    }

    #[test]
    fn test_template_round_trips() {
        let (_temp_dir, config_path) = setup_test_dir("plex-cleanup.toml");
        let persistence = ConfigPersistence::new(config_path);

        persistence.write_template().expect("Should write template");
        assert_eq!(persistence.read().expect("Should read"), Settings::template());
    }

    #[test]
    fn test_invalid_toml_returns_parse_error() {
        let (_temp_dir, config_path) = setup_test_dir("plex-cleanup.toml");
        fs::write(&config_path, "this is not valid TOML {{{").expect("Should write file");

        let result = ConfigPersistence::new(config_path).read();
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_invalid_json_returns_parse_error() {
        let (_temp_dir, config_path) = setup_test_dir("plex-cleanup.json");
        fs::write(&config_path, "{\"plex_url\": ").expect("Should write file");

        let result = ConfigPersistence::new(config_path).read();
        assert!(matches!(result, Err(ConfigError::JsonParseError { .. })));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let (_temp_dir, config_path) = setup_test_dir("plex-cleanup.toml");
        fs::write(&config_path, "   \n").expect("Should write file");

        let result = ConfigPersistence::new(config_path).read();
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
