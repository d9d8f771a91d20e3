//! Core domain model for plex-cleanup
//!
//! Holds the catalog-facing types shared by every other crate in the
//! workspace: collections, movies and their media parts, the `MediaCatalog`
//! trait the maintenance passes are written against, and its error type.

pub mod catalog;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use catalog::MediaCatalog;
pub use error::{CatalogError, CatalogResult};
pub use types::{Collection, MediaPart, Movie, RatingKey};
