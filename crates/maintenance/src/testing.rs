//! In-memory catalog used by the unit tests

use plex_cleanup_core::{
    CatalogError, CatalogResult, Collection, MediaCatalog, MediaPart, Movie, RatingKey,
};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

#[derive(Default)]
pub struct FakeCatalog {
    pub collections: HashMap<String, Vec<Collection>>,
    pub movies: HashMap<String, Vec<Movie>>,
    pub failing_libraries: HashSet<String>,
    pub failing_items: HashSet<String>,
    pub rejects_token: bool,
    pub deleted: RefCell<Vec<String>>,
    pub renamed: RefCell<Vec<(String, String, String)>>,
}

impl FakeCatalog {
    pub fn with_collections(mut self, library: &str, entries: &[(&str, u32)]) -> Self {
        let collections = entries
            .iter()
            .enumerate()
            .map(|(i, (title, count))| {
                Collection::new(RatingKey::new(format!("{library}-{i}")), *title, *count, library)
            })
            .collect();
        self.collections.insert(library.to_string(), collections);
        self
    }

    pub fn with_movies(mut self, library: &str, entries: &[(&str, &str)]) -> Self {
        let movies = entries
            .iter()
            .enumerate()
            .map(|(i, (title, file))| {
                Movie::new(
                    RatingKey::new(format!("{library}-{i}")),
                    library,
                    *title,
                    vec![MediaPart::new(*file)],
                )
            })
            .collect();
        self.movies.insert(library.to_string(), movies);
        self
    }

    pub fn failing_library(mut self, library: &str) -> Self {
        self.failing_libraries.insert(library.to_string());
        self
    }

    pub fn failing_item(mut self, title: &str) -> Self {
        self.failing_items.insert(title.to_string());
        self
    }

    pub fn rejecting_token(mut self) -> Self {
        self.rejects_token = true;
        self
    }

    fn check_library(&self, library: &str) -> CatalogResult<()> {
        if self.rejects_token {
            Err(CatalogError::Unauthorized)
        } else if self.failing_libraries.contains(library) {
            Err(CatalogError::Transport("connection reset".to_string()))
        } else {
            Ok(())
        }
    }
}

impl MediaCatalog for FakeCatalog {
    fn collections(&self, library: &str) -> CatalogResult<Vec<Collection>> {
        self.check_library(library)?;
        self.collections
            .get(library)
            .cloned()
            .ok_or_else(|| CatalogError::LibraryNotFound(library.to_string()))
    }

    fn delete_collection(&self, collection: &Collection) -> CatalogResult<()> {
        if self.failing_items.contains(&collection.title) {
            return Err(CatalogError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        self.deleted.borrow_mut().push(collection.title.clone());
        Ok(())
    }

    fn movies(&self, library: &str) -> CatalogResult<Vec<Movie>> {
        self.check_library(library)?;
        self.movies
            .get(library)
            .cloned()
            .ok_or_else(|| CatalogError::LibraryNotFound(library.to_string()))
    }

    fn update_movie_title(
        &self,
        movie: &Movie,
        title: &str,
        sort_title: &str,
    ) -> CatalogResult<()> {
        if self.failing_items.contains(&movie.title) {
            return Err(CatalogError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        self.renamed.borrow_mut().push((
            movie.title.clone(),
            title.to_string(),
            sort_title.to_string(),
        ));
        Ok(())
    }
}
