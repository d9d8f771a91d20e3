//! Movie and media part domain models

use crate::types::RatingKey;
use serde::{Deserialize, Serialize};

/// One file backing a movie, as the server reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPart {
    /// Path on the server's filesystem. May use `/` or `\` separators.
    pub file: String,
}

impl MediaPart {
    pub fn new(file: impl Into<String>) -> Self {
        Self { file: file.into() }
    }
}

/// A movie owned by the remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub rating_key: RatingKey,
    /// Key of the library section holding the movie; needed for edits
    pub section_key: String,
    pub title: String,
    pub sort_title: String,
    pub parts: Vec<MediaPart>,
}

impl Movie {
    /// Creates a movie whose sort title equals its title
    pub fn new(
        rating_key: RatingKey,
        section_key: impl Into<String>,
        title: impl Into<String>,
        parts: Vec<MediaPart>,
    ) -> Self {
        let title = title.into();
        Self {
            rating_key,
            section_key: section_key.into(),
            sort_title: title.clone(),
            title,
            parts,
        }
    }

    pub fn with_sort_title(mut self, sort_title: impl Into<String>) -> Self {
        self.sort_title = sort_title.into();
        self
    }

    /// The first backing file, which names the movie on disk
    pub fn primary_file(&self) -> Option<&str> {
        self.parts.first().map(|part| part.file.as_str())
    }
}
