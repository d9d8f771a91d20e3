//! Maintenance passes over a Plex catalog
//!
//! Two independent phases make up a run:
//!
//! - the collection filter, which finds collections with too few members and
//!   deletes or reports them
//! - the title reconciler, which compares each movie's title with the name of
//!   its backing file and optionally renames the movie
//!
//! Both work against the [`MediaCatalog`](plex_cleanup_core::MediaCatalog)
//! trait and never abort on a single failing library or item.

pub mod collections;
mod error;
pub mod runner;
pub mod titles;

#[cfg(test)]
mod testing;

pub use collections::{
    apply_collection_disposition, select_undersized_collections, CollectionScan,
    DispositionSummary,
};
pub use error::{ItemFailure, LibraryFailure, MaintenanceError, MaintenanceResult};
pub use runner::{run_once, RunContext, RunSummary};
pub use titles::{
    file_derived_candidate, gather_movies, reconcile_titles, MovieScan, ReconcileSummary,
    TitleMismatch, TitleNormalizer, TitleRules,
};
