//! Error types for maintenance runs
//!
//! Catalog failures inside a run are recorded in the run's summaries rather
//! than returned; only problems that make the whole run impossible surface
//! here.

use plex_cleanup_core::CatalogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaintenanceError {
    #[error("Skip tokens could not be compiled: {0}")]
    InvalidSkipTokens(#[from] regex::Error),
}

pub type MaintenanceResult<T> = std::result::Result<T, MaintenanceError>;

/// A library whose listing failed; the rest of the run carried on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryFailure {
    pub library: String,
    pub error: CatalogError,
}

/// A single collection or movie that could not be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub title: String,
    pub error: CatalogError,
}
