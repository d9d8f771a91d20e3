//! The media catalog seam
//!
//! Maintenance logic never talks HTTP directly. It is written against this
//! trait, which the Plex client implements and tests replace with an
//! in-memory catalog.

use crate::{CatalogResult, Collection, Movie};

/// Read and mutate operations the maintenance passes need from a media server
///
/// All calls are blocking. Implementations apply their own timeouts.
pub trait MediaCatalog {
    /// Lists every collection in the named library, in server order
    fn collections(&self, library: &str) -> CatalogResult<Vec<Collection>>;

    /// Deletes a collection. The movies it grouped are left untouched.
    fn delete_collection(&self, collection: &Collection) -> CatalogResult<()>;

    /// Lists every movie in the named library, in server order
    fn movies(&self, library: &str) -> CatalogResult<Vec<Movie>>;

    /// Sets a movie's display title and sort title
    fn update_movie_title(
        &self,
        movie: &Movie,
        title: &str,
        sort_title: &str,
    ) -> CatalogResult<()>;
}
