//! One complete maintenance pass over the catalog

use crate::collections::{
    apply_collection_disposition, select_undersized_collections, CollectionScan,
    DispositionSummary,
};
use crate::error::MaintenanceResult;
use crate::titles::{gather_movies, reconcile_titles, MovieScan, ReconcileSummary, TitleRules};
use plex_cleanup_config::Settings;
use plex_cleanup_core::MediaCatalog;

/// Everything a run needs, built once at startup
pub struct RunContext<'a> {
    pub catalog: &'a dyn MediaCatalog,
    pub settings: &'a Settings,
    /// Forces report-only mode for both phases
    pub dry_run: bool,
}

impl<'a> RunContext<'a> {
    pub fn new(catalog: &'a dyn MediaCatalog, settings: &'a Settings) -> Self {
        Self {
            catalog,
            settings,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn delete_enabled(&self) -> bool {
        !self.dry_run && self.settings.delete_undersized_collections
    }

    fn rename_enabled(&self) -> bool {
        !self.dry_run && self.settings.enforce_movie_names_match_file_names
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub collections: CollectionScan,
    pub disposition: DispositionSummary,
    pub movies: MovieScan,
    pub titles: ReconcileSummary,
}

impl RunSummary {
    /// Total of library and item failures across both phases
    pub fn failure_count(&self) -> usize {
        self.collections.failures.len()
            + self.disposition.failures.len()
            + self.movies.failures.len()
            + self.titles.failures.len()
    }

    /// True if any library listing failed because the token was rejected
    pub fn token_rejected(&self) -> bool {
        self.collections
            .failures
            .iter()
            .chain(self.movies.failures.iter())
            .any(|failure| failure.error.is_auth_failure())
    }
}

/// Runs the collection phase, then the title phase
///
/// Catalog failures are recorded in the summary; only invalid skip tokens
/// abort the run.
pub fn run_once(context: &RunContext<'_>) -> MaintenanceResult<RunSummary> {
    let settings = context.settings;
    let rules = TitleRules::new(
        &settings.movie_name_enforce_skip_characters,
        &settings.enforce_movie_names_exclude,
    )?;

    if context.dry_run {
        log::info!("Dry run: no changes will be made to the server");
    }

    let collections = select_undersized_collections(
        context.catalog,
        &settings.movie_libraries,
        settings.collection_size_minimum,
    );
    let disposition =
        apply_collection_disposition(context.catalog, &collections.undersized, context.delete_enabled());

    let movies = gather_movies(context.catalog, &settings.movie_libraries);
    let titles = reconcile_titles(
        context.catalog,
        &movies.movies,
        context.rename_enabled(),
        &rules,
    );

    let summary = RunSummary {
        collections,
        disposition,
        movies,
        titles,
    };

    if summary.failure_count() > 0 {
        log::warn!("Run finished with {} failures", summary.failure_count());
    } else {
        log::info!("Run finished");
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeCatalog;

    fn settings() -> Settings {
        let mut settings = Settings::new("http://localhost:32400", "secret").unwrap();
        settings.delete_undersized_collections = true;
        settings.enforce_movie_names_match_file_names = true;
        settings
    }

    fn catalog() -> FakeCatalog {
        FakeCatalog::default()
            .with_collections("Movies", &[("Tiny", 1), ("Big", 3)])
            .with_movies("Movies", &[("The Heat", "/m/Heat (1995).mkv")])
    }

    #[test]
    fn test_run_applies_both_phases() {
        let catalog = catalog();
        let settings = settings();
        let context = RunContext::new(&catalog, &settings);

        let summary = run_once(&context).unwrap();

        assert_eq!(summary.disposition.deleted, vec!["Tiny"]);
        assert_eq!(summary.titles.renamed, 1);
        assert_eq!(summary.failure_count(), 0);
    }

    #[test]
    fn test_dry_run_overrides_settings() {
        let catalog = catalog();
        let settings = settings();
        let context = RunContext::new(&catalog, &settings).with_dry_run(true);

        let summary = run_once(&context).unwrap();

        assert!(catalog.deleted.borrow().is_empty());
        assert!(catalog.renamed.borrow().is_empty());
        assert_eq!(summary.disposition.reported, vec!["Tiny"]);
        assert_eq!(summary.titles.mismatches.len(), 1);
    }

    #[test]
    fn test_defaults_report_only() {
        let catalog = catalog();
        let settings = Settings::new("http://localhost:32400", "secret").unwrap();
        let context = RunContext::new(&catalog, &settings);

        let summary = run_once(&context).unwrap();

        assert!(catalog.deleted.borrow().is_empty());
        assert_eq!(summary.titles.renamed, 0);
    }

    #[test]
    fn test_token_rejection_is_flagged() {
        let catalog = catalog().rejecting_token();
        let settings = settings();

        let summary = run_once(&RunContext::new(&catalog, &settings)).unwrap();

        assert!(summary.token_rejected());
        assert_eq!(summary.failure_count(), 2);
        assert!(!run_once(&RunContext::new(&self::catalog(), &settings))
            .unwrap()
            .token_rejected());
    }
}
