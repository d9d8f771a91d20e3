//! The settings record driving a maintenance run

use crate::error::{ConfigError, ConfigResult};
use crate::validation::{ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Server URL written into a freshly generated template
pub const TEMPLATE_PLEX_URL: &str = "https://plex-ip-or-hostname:32400/";

/// API key written into a freshly generated template
pub const TEMPLATE_API_KEY: &str = "<insert_api_key_here>";

/// Everything a run needs to know
///
/// Field names match the keys of the config file and, upper cased with the
/// `PLEX_CLEANUP_` prefix, the environment overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Base URL of the Plex server, e.g. `http://192.168.1.10:32400`
    pub plex_url: String,

    /// Plex token used for every request
    pub api_key: String,

    /// Libraries to scan, in order
    #[serde(default = "default_movie_libraries")]
    pub movie_libraries: Vec<String>,

    /// Collections with fewer members are undersized; -1 disables the check
    #[serde(default = "default_collection_size_minimum")]
    pub collection_size_minimum: i64,

    /// Delete undersized collections instead of only reporting them
    #[serde(default)]
    pub delete_undersized_collections: bool,

    /// Rename movies whose title does not match their file name
    #[serde(default)]
    pub enforce_movie_names_match_file_names: bool,

    /// Tokens removed from both sides before titles are compared
    #[serde(default = "default_skip_characters")]
    pub movie_name_enforce_skip_characters: Vec<String>,

    /// Movies whose title contains any of these are never touched
    #[serde(default)]
    pub enforce_movie_names_exclude: Vec<String>,

    /// Verify the server's TLS certificate (Plex commonly serves self-signed ones)
    #[serde(default)]
    pub verify_certificates: bool,
}

fn default_movie_libraries() -> Vec<String> {
    vec!["Movies".to_string()]
}

const fn default_collection_size_minimum() -> i64 {
    2
}

fn default_skip_characters() -> Vec<String> {
    [":", "-", ".", "?"].iter().map(|s| s.to_string()).collect()
}

impl Settings {
    /// Creates settings for a server, with every other field at its default
    ///
    /// Fails if the URL or key is empty.
    pub fn new(plex_url: impl Into<String>, api_key: impl Into<String>) -> ConfigResult<Self> {
        let settings = Self::unchecked(plex_url.into(), api_key.into());
        settings
            .validate()
            .map_err(|errors| ConfigError::from_validation(&errors))?;
        Ok(settings)
    }

    /// Settings written to disk when no config file exists yet
    pub fn template() -> Self {
        Self::unchecked(TEMPLATE_PLEX_URL.to_string(), TEMPLATE_API_KEY.to_string())
    }

    fn unchecked(plex_url: String, api_key: String) -> Self {
        Self {
            plex_url,
            api_key,
            movie_libraries: default_movie_libraries(),
            collection_size_minimum: default_collection_size_minimum(),
            delete_undersized_collections: false,
            enforce_movie_names_match_file_names: false,
            movie_name_enforce_skip_characters: default_skip_characters(),
            enforce_movie_names_exclude: Vec::new(),
            verify_certificates: false,
        }
    }

    /// Validates every field, returning all failures found
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![
            Validator::not_empty(&self.plex_url, "plex_url"),
            Validator::not_empty(&self.api_key, "api_key"),
            Validator::not_placeholder(&self.api_key, TEMPLATE_API_KEY, "api_key"),
            Validator::at_least(self.collection_size_minimum, -1, "collection_size_minimum"),
        ];

        if !self.plex_url.trim().is_empty() {
            results.push(Validator::http_url(&self.plex_url, "plex_url"));
        }

        for (i, library) in self.movie_libraries.iter().enumerate() {
            results.push(Validator::not_empty(
                library,
                &format!("movie_libraries[{}]", i),
            ));
        }

        Validator::collect_errors(results)
    }
}
