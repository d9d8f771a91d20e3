//! Environment variable overrides
//!
//! Each overridable field is listed explicitly with its own typed parser, so
//! renaming a struct field never silently changes which variables are read.
//! Variables are named `PLEX_CLEANUP_<FIELD>`, e.g.
//! `PLEX_CLEANUP_COLLECTION_SIZE_MINIMUM=3`.

use crate::error::{ConfigError, ConfigResult};
use crate::Settings;

/// Prefix shared by every override variable
pub const ENV_PREFIX: &str = "PLEX_CLEANUP_";

type Setter = fn(&mut Settings, &str) -> Result<(), String>;

/// One overridable field
struct EnvOverride {
    field: &'static str,
    apply: Setter,
}

const OVERRIDES: &[EnvOverride] = &[
    EnvOverride {
        field: "plex_url",
        apply: set_plex_url,
    },
    EnvOverride {
        field: "api_key",
        apply: set_api_key,
    },
    EnvOverride {
        field: "movie_libraries",
        apply: set_movie_libraries,
    },
    EnvOverride {
        field: "collection_size_minimum",
        apply: set_collection_size_minimum,
    },
    EnvOverride {
        field: "delete_undersized_collections",
        apply: set_delete_undersized_collections,
    },
    EnvOverride {
        field: "enforce_movie_names_match_file_names",
        apply: set_enforce_movie_names,
    },
    EnvOverride {
        field: "movie_name_enforce_skip_characters",
        apply: set_skip_characters,
    },
    EnvOverride {
        field: "enforce_movie_names_exclude",
        apply: set_exclusions,
    },
    EnvOverride {
        field: "verify_certificates",
        apply: set_verify_certificates,
    },
];

fn set_plex_url(settings: &mut Settings, value: &str) -> Result<(), String> {
    settings.plex_url = value.to_string();
    Ok(())
}

fn set_api_key(settings: &mut Settings, value: &str) -> Result<(), String> {
    settings.api_key = value.to_string();
    Ok(())
}

fn set_movie_libraries(settings: &mut Settings, value: &str) -> Result<(), String> {
    settings.movie_libraries = parse_list(value)?;
    Ok(())
}

fn set_collection_size_minimum(settings: &mut Settings, value: &str) -> Result<(), String> {
    settings.collection_size_minimum = parse_integer(value)?;
    Ok(())
}

fn set_delete_undersized_collections(settings: &mut Settings, value: &str) -> Result<(), String> {
    settings.delete_undersized_collections = parse_bool(value)?;
    Ok(())
}

fn set_enforce_movie_names(settings: &mut Settings, value: &str) -> Result<(), String> {
    settings.enforce_movie_names_match_file_names = parse_bool(value)?;
    Ok(())
}

fn set_skip_characters(settings: &mut Settings, value: &str) -> Result<(), String> {
    settings.movie_name_enforce_skip_characters = parse_list(value)?;
    Ok(())
}

fn set_exclusions(settings: &mut Settings, value: &str) -> Result<(), String> {
    settings.enforce_movie_names_exclude = parse_list(value)?;
    Ok(())
}

fn set_verify_certificates(settings: &mut Settings, value: &str) -> Result<(), String> {
    settings.verify_certificates = parse_bool(value)?;
    Ok(())
}

/// Returns the variable name that overrides `field`
pub fn env_var_name(field: &str) -> String {
    format!("{}{}", ENV_PREFIX, field.to_ascii_uppercase())
}

/// Names of every field that can be overridden
pub fn overridable_fields() -> impl Iterator<Item = &'static str> {
    OVERRIDES.iter().map(|o| o.field)
}

/// Applies overrides found through `lookup`, returning the fields changed
///
/// `lookup` receives the full variable name. The first malformed value
/// aborts with an error naming the variable.
pub fn apply_overrides<F>(settings: &mut Settings, lookup: F) -> ConfigResult<Vec<&'static str>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = Vec::new();

    for entry in OVERRIDES {
        let variable = env_var_name(entry.field);
        let Some(value) = lookup(&variable) else {
            continue;
        };

        (entry.apply)(settings, &value)
            .map_err(|reason| ConfigError::EnvOverride {
                variable: variable.clone(),
                reason,
            })?;

        log::debug!("Applied override from {}", variable);
        applied.push(entry.field);
    }

    Ok(applied)
}

/// Applies overrides from the process environment
pub fn apply_process_env(settings: &mut Settings) -> ConfigResult<Vec<&'static str>> {
    apply_overrides(settings, |name| std::env::var(name).ok())
}

/// Parses a boolean flag
pub fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(format!("expected a boolean (true/false), got '{}'", other)),
    }
}

/// Parses a signed integer
pub fn parse_integer(value: &str) -> Result<i64, String> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("expected an integer, got '{}': {}", value.trim(), e))
}

/// Parses a list of strings
///
/// Accepts a JSON array (`["Movies", "4K Movies"]`) or a comma-separated
/// list (`Movies,4K Movies`). Comma-separated entries are trimmed and empty
/// entries dropped; JSON entries are kept verbatim so tokens like `" "` can
/// be expressed.
pub fn parse_list(value: &str) -> Result<Vec<String>, String> {
    let trimmed = value.trim();

    if trimmed.starts_with('[') {
        return serde_json::from_str::<Vec<String>>(trimmed)
            .map_err(|e| format!("expected a JSON array of strings: {}", e));
    }

    Ok(trimmed
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}
