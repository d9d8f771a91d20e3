//! Configuration manager - main API for config operations

use crate::overrides;
use crate::persistence::ConfigPersistence;
use crate::{ConfigError, ConfigResult, Settings};
use std::path::{Path, PathBuf};

/// File name used when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "plex-cleanup.toml";

/// JSON config name still picked up when no TOML config exists
pub const LEGACY_CONFIG_FILE: &str = "plex-cleanup.json";

/// Resolves the config file in `dir` when none was named explicitly
///
/// Prefers `plex-cleanup.toml`; an existing `plex-cleanup.json` is used only
/// if the TOML file is absent. With neither present the TOML path is returned
/// so a template gets written there.
pub fn default_config_path(dir: &Path) -> PathBuf {
    let toml_path = dir.join(DEFAULT_CONFIG_FILE);
    let json_path = dir.join(LEGACY_CONFIG_FILE);

    if !toml_path.exists() && json_path.exists() {
        log::debug!("Using JSON config {}", json_path.display());
        return json_path;
    }
    toml_path
}

/// Result of asking for the run's settings
#[derive(Debug)]
pub enum LoadOutcome {
    /// A valid config was read (environment overrides applied)
    Loaded(Settings),

    /// No config existed; a template was written here for the operator to fill in
    Created(PathBuf),

    /// The config exists but cannot be used
    Invalid(ConfigError),
}

/// Main configuration manager
///
/// Owns the config file location and turns "read the file, apply the
/// environment, validate" into a single `LoadOutcome`.
pub struct ConfigManager {
    persistence: ConfigPersistence,
}

impl ConfigManager {
    /// Creates a manager for the default config in the working directory
    pub fn new() -> Self {
        Self::with_path(default_config_path(Path::new(".")))
    }

    /// Creates a config manager for a specific config file
    pub fn with_path(config_path: PathBuf) -> Self {
        Self {
            persistence: ConfigPersistence::new(config_path),
        }
    }

    /// Returns the full config file path
    pub fn config_path(&self) -> &Path {
        self.persistence.config_path()
    }

    /// Loads settings, applying `PLEX_CLEANUP_*` environment overrides
    pub fn load(&self) -> LoadOutcome {
        self.load_with(|name| std::env::var(name).ok())
    }

    /// Loads settings, resolving overrides through `lookup`
    pub fn load_with<F>(&self, lookup: F) -> LoadOutcome
    where
        F: Fn(&str) -> Option<String>,
    {
        if !self.persistence.exists() {
            log::info!(
                "Config file not found at {}, creating a template",
                self.config_path().display()
            );
            return match self.persistence.write_template() {
                Ok(()) => LoadOutcome::Created(self.config_path().to_path_buf()),
                Err(e) => LoadOutcome::Invalid(e),
            };
        }

        match self.read_validated(lookup) {
            Ok(settings) => LoadOutcome::Loaded(settings),
            Err(e) => LoadOutcome::Invalid(e),
        }
    }

    fn read_validated<F>(&self, lookup: F) -> ConfigResult<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        log::debug!("Reading config file: {}", self.config_path().display());
        let mut settings = self.persistence.read()?;

        let applied = overrides::apply_overrides(&mut settings, lookup)?;
        if !applied.is_empty() {
            log::info!("Environment overrides applied to: {}", applied.join(", "));
        }

        settings
            .validate()
            .map_err(|errors| ConfigError::from_validation(&errors))?;

        log::info!("Config loaded from {}", self.config_path().display());
        Ok(settings)
    }

    /// Writes a template config
    ///
    /// Returns Ok(true) if a file was written, Ok(false) if one already
    /// exists and `overwrite` is false.
    pub fn initialize(&self, overwrite: bool) -> ConfigResult<bool> {
        if self.persistence.exists() && !overwrite {
            log::info!(
                "Config file already exists at {}",
                self.config_path().display()
            );
            return Ok(false);
        }

        self.persistence.write_template()?;
        Ok(true)
    }

    /// Validates the config file with environment overrides applied,
    /// returning every problem found
    pub fn validate(&self) -> ConfigResult<Vec<String>> {
        self.validate_with(|name| std::env::var(name).ok())
    }

    /// Validates the config file, resolving overrides through `lookup`
    ///
    /// A malformed override value is an error, not a problem entry.
    pub fn validate_with<F>(&self, lookup: F) -> ConfigResult<Vec<String>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = self.persistence.read()?;
        overrides::apply_overrides(&mut settings, lookup)?;

        match settings.validate() {
            Ok(()) => Ok(Vec::new()),
            Err(errors) => Ok(errors.iter().map(|e| e.to_string()).collect()),
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
