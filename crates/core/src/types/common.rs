//! Identifiers shared across catalog items

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier of a catalog item (Plex `ratingKey`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RatingKey(String);

impl RatingKey {
    /// Wraps a raw key as returned by the server
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RatingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RatingKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
