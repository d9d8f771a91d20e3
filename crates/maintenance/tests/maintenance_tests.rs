// crates/maintenance/tests/maintenance_tests.rs
//! End-to-end maintenance runs against a scripted catalog

use plex_cleanup_config::Settings;
use plex_cleanup_core::{
    CatalogError, CatalogResult, Collection, MediaCatalog, MediaPart, Movie, RatingKey,
};
use plex_cleanup_maintenance::{run_once, RunContext};
use std::sync::Mutex;

/// Catalog whose calls are all recorded in order
struct ScriptedCatalog {
    collections: Vec<Collection>,
    movies: Vec<Movie>,
    unreachable_library: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedCatalog {
    fn new() -> Self {
        let collections = vec![
            Collection::new(RatingKey::new("10"), "Alien Collection", 4, "Movies"),
            Collection::new(RatingKey::new("11"), "Heat Collection", 1, "Movies"),
            Collection::new(RatingKey::new("12"), "Empty Collection", 0, "Movies"),
        ];
        let movies = vec![
            Movie::new(
                RatingKey::new("1"),
                "1",
                "Spider-Man: Homecoming",
                vec![MediaPart::new("/movies/Spider-Man Homecoming (2017).mkv")],
            ),
            Movie::new(
                RatingKey::new("2"),
                "1",
                "Star Wars: A New Hope",
                vec![MediaPart::new("/movies/Episode IV (1977).mkv")],
            ),
            Movie::new(
                RatingKey::new("3"),
                "1",
                "Heat (Directors Cut)",
                vec![MediaPart::new(r"\\nas\movies\Heat (1995).mkv")],
            ),
        ];

        Self {
            collections,
            movies,
            unreachable_library: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_unreachable(mut self, library: &str) -> Self {
        self.unreachable_library = Some(library.to_string());
        self
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("Poisoned").push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("Poisoned").clone()
    }

    fn mutations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with("delete") || c.starts_with("rename"))
            .collect()
    }

    fn reachable(&self, library: &str) -> CatalogResult<()> {
        match &self.unreachable_library {
            Some(name) if name == library => {
                Err(CatalogError::Transport("timed out".to_string()))
            }
            _ if library == "Movies" => Ok(()),
            _ => Err(CatalogError::LibraryNotFound(library.to_string())),
        }
    }
}

impl MediaCatalog for ScriptedCatalog {
    fn collections(&self, library: &str) -> CatalogResult<Vec<Collection>> {
        self.record(format!("collections {}", library));
        self.reachable(library)?;
        Ok(self.collections.clone())
    }

    fn delete_collection(&self, collection: &Collection) -> CatalogResult<()> {
        self.record(format!("delete {}", collection.rating_key));
        Ok(())
    }

    fn movies(&self, library: &str) -> CatalogResult<Vec<Movie>> {
        self.record(format!("movies {}", library));
        self.reachable(library)?;
        Ok(self.movies.clone())
    }

    fn update_movie_title(
        &self,
        movie: &Movie,
        title: &str,
        sort_title: &str,
    ) -> CatalogResult<()> {
        self.record(format!("rename {} {} / {}", movie.rating_key, title, sort_title));
        Ok(())
    }
}

fn settings() -> Settings {
    let mut settings = Settings::new("https://plex.local:32400/", "token").expect("Valid settings");
    settings.enforce_movie_names_exclude = vec!["Star Wars".to_string()];
    settings
}

#[test]
fn test_report_only_run_touches_nothing() {
    let _ = env_logger::builder().is_test(true).try_init();
    let catalog = ScriptedCatalog::new();
    let settings = settings();

    let summary = run_once(&RunContext::new(&catalog, &settings)).expect("Run should succeed");

    assert!(catalog.mutations().is_empty());
    assert_eq!(
        summary.disposition.reported,
        vec!["Heat Collection", "Empty Collection"]
    );
    assert_eq!(summary.collections.total_seen, 3);
    assert_eq!(summary.titles.examined, 3);
    assert_eq!(summary.titles.excluded, 1);
    assert_eq!(summary.titles.matched, 1);
    assert_eq!(summary.titles.mismatches.len(), 1);
    assert_eq!(summary.titles.mismatches[0].candidate, "Heat");
}

#[test]
fn test_enforcing_run_mutates_in_order() {
    let catalog = ScriptedCatalog::new();
    let mut settings = settings();
    settings.delete_undersized_collections = true;
    settings.enforce_movie_names_match_file_names = true;

    let summary = run_once(&RunContext::new(&catalog, &settings)).expect("Run should succeed");

    assert_eq!(
        catalog.mutations(),
        vec![
            "delete 11".to_string(),
            "delete 12".to_string(),
            "rename 3 Heat / Heat".to_string(),
        ]
    );
    assert_eq!(summary.titles.renamed, 1);
    assert_eq!(summary.failure_count(), 0);
}

#[test]
fn test_collection_phase_runs_before_title_phase() {
    let catalog = ScriptedCatalog::new();
    let settings = settings();

    run_once(&RunContext::new(&catalog, &settings)).expect("Run should succeed");

    assert_eq!(
        catalog.calls(),
        vec!["collections Movies".to_string(), "movies Movies".to_string()]
    );
}

#[test]
fn test_sentinel_minimum_keeps_all_collections() {
    let catalog = ScriptedCatalog::new();
    let mut settings = settings();
    settings.collection_size_minimum = -1;
    settings.delete_undersized_collections = true;

    let summary = run_once(&RunContext::new(&catalog, &settings)).expect("Run should succeed");

    assert!(summary.collections.undersized.is_empty());
    assert_eq!(summary.collections.total_seen, 3);
    assert!(catalog.mutations().is_empty());
}

#[test]
fn test_failing_libraries_are_recorded() {
    let catalog = ScriptedCatalog::new().with_unreachable("4K");
    let mut settings = settings();
    settings.movie_libraries = vec!["4K".to_string(), "Kids".to_string(), "Movies".to_string()];

    let summary = run_once(&RunContext::new(&catalog, &settings)).expect("Run should succeed");

    assert_eq!(summary.collections.failures.len(), 2);
    assert!(!summary.collections.failures[0].error.is_auth_failure());
    assert_eq!(
        summary.collections.failures[1].error,
        CatalogError::LibraryNotFound("Kids".to_string())
    );
    assert_eq!(summary.movies.failures.len(), 2);
    assert_eq!(summary.movies.movies.len(), 3);
    assert_eq!(summary.failure_count(), 4);
}

#[test]
fn test_dry_run_forces_report_only() {
    let catalog = ScriptedCatalog::new();
    let mut settings = settings();
    settings.delete_undersized_collections = true;
    settings.enforce_movie_names_match_file_names = true;

    let context = RunContext::new(&catalog, &settings).with_dry_run(true);
    let summary = run_once(&context).expect("Run should succeed");

    assert!(catalog.mutations().is_empty());
    assert_eq!(summary.disposition.reported.len(), 2);
    assert_eq!(summary.titles.renamed, 0);
}
