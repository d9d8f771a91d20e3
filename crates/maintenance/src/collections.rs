//! Undersized collection selection and disposition

use crate::error::{ItemFailure, LibraryFailure};
use plex_cleanup_core::{Collection, MediaCatalog};

/// Outcome of scanning every configured library for collections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionScan {
    /// Undersized collections, in library order then discovery order
    pub undersized: Vec<Collection>,
    /// Every collection seen across the libraries that could be listed
    pub total_seen: usize,
    /// Libraries that could not be listed
    pub failures: Vec<LibraryFailure>,
}

/// What happened to the undersized collections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispositionSummary {
    pub deleted: Vec<String>,
    /// Collections only reported because deletion is disabled
    pub reported: Vec<String>,
    pub failures: Vec<ItemFailure>,
}

/// Lists collections of every library and selects those below `minimum_size`
///
/// A `minimum_size` of -1 selects nothing, though collections are still
/// counted. A library that fails to list is recorded and skipped.
pub fn select_undersized_collections<C>(
    catalog: &C,
    libraries: &[String],
    minimum_size: i64,
) -> CollectionScan
where
    C: MediaCatalog + ?Sized,
{
    let mut scan = CollectionScan::default();

    for library in libraries {
        log::debug!("Loading collections from library: {}", library);

        let collections = match catalog.collections(library) {
            Ok(collections) => collections,
            Err(e) => {
                if e.is_auth_failure() {
                    log::error!(
                        "Plex rejected the API key while listing library [{}]; check api_key",
                        library
                    );
                } else {
                    log::error!("Failed to list collections of library [{}]: {}", library, e);
                }
                scan.failures.push(LibraryFailure {
                    library: library.clone(),
                    error: e,
                });
                continue;
            }
        };

        log::info!(
            "Library [{}] has a collection count of [{}]",
            library,
            collections.len()
        );

        for collection in collections {
            scan.total_seen += 1;

            log::debug!(
                "Checking collection [{}] with [{}] members against minimum [{}]",
                collection.title,
                collection.member_count,
                minimum_size
            );

            if collection.is_undersized(minimum_size) {
                log::debug!("Collection is undersized: {}", collection.title);
                scan.undersized.push(collection);
            }
        }
    }

    log::info!("Total undersized collections: {}", scan.undersized.len());
    log::info!(
        "Total collections enumerated: {} from {} libraries",
        scan.total_seen,
        libraries.len()
    );

    scan
}

/// Deletes the given collections, or only reports them when deletion is disabled
///
/// A failed deletion is recorded and the remaining collections are still
/// processed.
pub fn apply_collection_disposition<C>(
    catalog: &C,
    collections: &[Collection],
    delete_enabled: bool,
) -> DispositionSummary
where
    C: MediaCatalog + ?Sized,
{
    let mut summary = DispositionSummary::default();

    for collection in collections {
        if !delete_enabled {
            log::info!(
                "Would delete undersized collection: {} ({} members, library {})",
                collection.title,
                collection.member_count,
                collection.library
            );
            summary.reported.push(collection.title.clone());
            continue;
        }

        log::debug!("Deleting collection: {}", collection.title);
        match catalog.delete_collection(collection) {
            Ok(()) => {
                log::info!("Deleted undersized collection: {}", collection.title);
                summary.deleted.push(collection.title.clone());
            }
            Err(e) => {
                log::error!("Failed to delete collection {}: {}", collection.title, e);
                summary.failures.push(ItemFailure {
                    title: collection.title.clone(),
                    error: e,
                });
            }
        }
    }

    summary
}
