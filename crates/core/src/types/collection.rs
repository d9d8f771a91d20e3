//! Collection domain model

use crate::types::RatingKey;
use serde::{Deserialize, Serialize};

/// A curated grouping of movies owned by the remote catalog
///
/// Collections are only ever read and, when undersized, deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub rating_key: RatingKey,
    pub title: String,
    /// Number of movies in the collection (Plex `childCount`)
    pub member_count: u32,
    /// Name of the library the collection was found in
    pub library: String,
}

impl Collection {
    pub fn new(
        rating_key: RatingKey,
        title: impl Into<String>,
        member_count: u32,
        library: impl Into<String>,
    ) -> Self {
        Self {
            rating_key,
            title: title.into(),
            member_count,
            library: library.into(),
        }
    }

    /// Returns true if the collection holds fewer members than `minimum`
    ///
    /// A negative minimum disables the check entirely.
    pub fn is_undersized(&self, minimum: i64) -> bool {
        minimum > -1 && i64::from(self.member_count) < minimum
    }
}
