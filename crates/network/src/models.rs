// crates/network/src/models.rs
//! JSON payloads returned by the Plex API
//!
//! Every response is wrapped in a `MediaContainer`. Lists are omitted
//! entirely when empty, so every list field defaults to empty.

use plex_cleanup_core::{Collection, MediaPart, Movie, RatingKey};
use serde::{Deserialize, Deserializer};

/// Outer `{"MediaContainer": ...}` wrapper
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "MediaContainer")]
    pub media_container: T,
}

/// Root endpoint (`GET /`) payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerIdentity {
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// `GET /library/sections` payload
#[derive(Debug, Deserialize)]
pub struct SectionList {
    #[serde(rename = "Directory", default)]
    pub directories: Vec<SectionEntry>,
}

/// One library section
#[derive(Debug, Clone, Deserialize)]
pub struct SectionEntry {
    pub key: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// `GET /library/sections/{key}/all` payload
#[derive(Debug, Deserialize)]
pub struct MetadataList<T> {
    #[serde(rename = "Metadata", default = "Vec::new")]
    pub metadata: Vec<T>,
}

/// A collection as listed with `type=18`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntry {
    pub rating_key: String,
    pub title: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub child_count: u32,
}

impl CollectionEntry {
    pub fn into_collection(self, library: &str) -> Collection {
        Collection::new(
            RatingKey::new(self.rating_key),
            self.title,
            self.child_count,
            library,
        )
    }
}

/// A movie as listed with `type=1`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieEntry {
    pub rating_key: String,
    pub title: String,
    #[serde(default)]
    pub title_sort: Option<String>,
    #[serde(rename = "Media", default)]
    pub media: Vec<MediaEntry>,
}

#[derive(Debug, Deserialize)]
pub struct MediaEntry {
    #[serde(rename = "Part", default)]
    pub parts: Vec<PartEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PartEntry {
    #[serde(default)]
    pub file: Option<String>,
}

impl MovieEntry {
    /// Converts to the domain model; parts without a file path are dropped
    pub fn into_movie(self, section_key: &str) -> Movie {
        let parts = self
            .media
            .into_iter()
            .flat_map(|media| media.parts)
            .filter_map(|part| part.file)
            .map(MediaPart::new)
            .collect();

        let movie = Movie::new(RatingKey::new(self.rating_key), section_key, self.title, parts);
        match self.title_sort {
            Some(sort_title) if !sort_title.is_empty() => movie.with_sort_title(sort_title),
            _ => movie,
        }
    }
}

/// Plex reports some counts as numbers and others as numeric strings
fn number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(text) => text
            .trim()
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid count '{}': {}", text, e))),
    }
}
