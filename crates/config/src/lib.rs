//! plex-cleanup configuration
//!
//! Settings live in a single file next to the binary's working directory
//! (`plex-cleanup.toml` by default, `.json` files are read as JSON). Loading
//! never throws its way out of "there is no file yet": the caller receives a
//! `LoadOutcome` and decides what to print and how to exit.
//!
//! # Example
//!
//! ```rust,no_run
//! use plex_cleanup_config::{ConfigManager, LoadOutcome};
//!
//! let manager = ConfigManager::new();
//! match manager.load() {
//!     LoadOutcome::Loaded(settings) => println!("Scanning {:?}", settings.movie_libraries),
//!     LoadOutcome::Created(path) => println!("Fill in {} and run again", path.display()),
//!     LoadOutcome::Invalid(e) => eprintln!("Config error: {}", e),
//! }
//! ```

mod error;
mod manager;
mod persistence;
mod settings;
mod validation;

pub mod overrides;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{
    default_config_path, ConfigManager, LoadOutcome, DEFAULT_CONFIG_FILE, LEGACY_CONFIG_FILE,
};
pub use persistence::{ConfigFormat, ConfigPersistence};
pub use settings::{Settings, TEMPLATE_API_KEY, TEMPLATE_PLEX_URL};
pub use validation::Validator;
