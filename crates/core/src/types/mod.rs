//! Domain types for plex-cleanup
//!
//! - `common`: identifiers shared by every catalog item
//! - `collection`: curated movie groupings
//! - `movie`: movies and their backing media parts

mod collection;
mod common;
mod movie;

// Re-export all public types
pub use collection::Collection;
pub use common::RatingKey;
pub use movie::{MediaPart, Movie};
