//! Movie title reconciliation against backing file names
//!
//! A movie's display title is compared with the title implied by its first
//! media file (`"Title (Year).ext"`). Both sides are normalized by removing
//! configured skip tokens before comparison, so punctuation differences that
//! file systems force on file names do not count as mismatches.

use crate::error::{ItemFailure, LibraryFailure, MaintenanceResult};
use plex_cleanup_core::{CatalogError, MediaCatalog, Movie};
use regex::Regex;

/// Removes skip tokens from titles before comparison
#[derive(Debug, Clone)]
pub struct TitleNormalizer {
    pattern: Option<Regex>,
}

impl TitleNormalizer {
    /// Compiles the skip tokens into a single alternation
    ///
    /// Tokens are matched literally. Empty tokens are ignored, and an empty
    /// token set leaves titles unchanged apart from trimming.
    pub fn new<S: AsRef<str>>(skip_tokens: &[S]) -> MaintenanceResult<Self> {
        let escaped: Vec<String> = skip_tokens
            .iter()
            .map(AsRef::as_ref)
            .filter(|token| !token.is_empty())
            .map(regex::escape)
            .collect();

        let pattern = if escaped.is_empty() {
            None
        } else {
            Some(Regex::new(&escaped.join("|"))?)
        };

        Ok(Self { pattern })
    }

    /// Strips every skip token and surrounding whitespace
    ///
    /// Repeats until nothing changes, so normalizing twice yields the same
    /// value as normalizing once.
    pub fn normalize(&self, value: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return value.trim().to_string();
        };

        // A single pass is not idempotent for multi-character tokens: removing
        // one occurrence can join its neighbours into a new one ("aabb" with "ab").
        let mut current = value.trim().to_string();
        loop {
            let stripped = pattern.replace_all(&current, "");
            let next = stripped.trim();
            if next == current {
                return current;
            }
            current = next.to_string();
        }
    }
}

/// Derives the title a media file name implies
///
/// Directory components (either separator) and the extension are dropped,
/// then everything from the first `(` on is cut and the rest trimmed.
pub fn file_derived_candidate(path: &str) -> String {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = strip_extension(name);
    let before_year = stem.split('(').next().unwrap_or(stem);
    before_year.trim().to_string()
}

// Leading dots belong to the name, not to an extension.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(index) if name[..index].chars().any(|c| c != '.') => &name[..index],
        _ => name,
    }
}

/// Skip tokens and excluded title fragments for one reconciliation pass
#[derive(Debug, Clone)]
pub struct TitleRules {
    normalizer: TitleNormalizer,
    exclusions: Vec<String>,
}

impl TitleRules {
    pub fn new<S, E>(skip_tokens: &[S], exclusions: &[E]) -> MaintenanceResult<Self>
    where
        S: AsRef<str>,
        E: AsRef<str>,
    {
        let exclusions = exclusions
            .iter()
            .map(AsRef::as_ref)
            .filter(|exclusion| {
                if exclusion.is_empty() {
                    log::warn!("Ignoring empty title exclusion; it would match every movie");
                    false
                } else {
                    true
                }
            })
            .map(str::to_string)
            .collect();

        Ok(Self {
            normalizer: TitleNormalizer::new(skip_tokens)?,
            exclusions,
        })
    }

    pub fn normalizer(&self) -> &TitleNormalizer {
        &self.normalizer
    }

    /// Returns the first exclusion contained in `title`, if any
    pub fn exclusion_for(&self, title: &str) -> Option<&str> {
        self.exclusions
            .iter()
            .map(String::as_str)
            .find(|exclusion| title.contains(exclusion))
    }
}

/// A movie whose title disagrees with its file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMismatch {
    pub title: String,
    pub candidate: String,
    pub file: String,
}

/// Movies gathered from every configured library
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieScan {
    pub movies: Vec<Movie>,
    pub failures: Vec<LibraryFailure>,
}

/// Lists the movies of every library in order, skipping libraries that fail
pub fn gather_movies<C>(catalog: &C, libraries: &[String]) -> MovieScan
where
    C: MediaCatalog + ?Sized,
{
    let mut scan = MovieScan::default();

    for library in libraries {
        match catalog.movies(library) {
            Ok(movies) => {
                log::info!("Library [{}] has a movie count of [{}]", library, movies.len());
                scan.movies.extend(movies);
            }
            Err(e) => {
                if e.is_auth_failure() {
                    log::error!(
                        "Plex rejected the API key while listing library [{}]; check api_key",
                        library
                    );
                } else {
                    log::error!("Failed to list movies of library [{}]: {}", library, e);
                }
                scan.failures.push(LibraryFailure {
                    library: library.clone(),
                    error: e,
                });
            }
        }
    }

    scan
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub examined: usize,
    pub excluded: usize,
    pub matched: usize,
    pub mismatches: Vec<TitleMismatch>,
    /// Movies whose title was changed on the server
    pub renamed: usize,
    pub failures: Vec<ItemFailure>,
}

/// Compares each movie's title with its file name and optionally fixes it
///
/// Mismatches are always reported. With `apply_changes` the title and sort
/// title are set to the file-derived candidate.
pub fn reconcile_titles<C>(
    catalog: &C,
    movies: &[Movie],
    apply_changes: bool,
    rules: &TitleRules,
) -> ReconcileSummary
where
    C: MediaCatalog + ?Sized,
{
    log::debug!("Starting movie title and file name reconciliation");
    let mut summary = ReconcileSummary::default();

    for movie in movies {
        summary.examined += 1;

        if let Some(exclusion) = rules.exclusion_for(&movie.title) {
            log::debug!(
                "Skipping excluded movie [{}] (matches [{}])",
                movie.title,
                exclusion
            );
            summary.excluded += 1;
            continue;
        }

        let Some(file) = movie.primary_file() else {
            log::error!("Movie [{}] has no media file to compare against", movie.title);
            summary.failures.push(ItemFailure {
                title: movie.title.clone(),
                error: CatalogError::InvalidItem {
                    title: movie.title.clone(),
                    reason: "no media part".to_string(),
                },
            });
            continue;
        };

        let candidate = file_derived_candidate(file);
        let normalized_title = rules.normalizer().normalize(&movie.title);
        let normalized_candidate = rules.normalizer().normalize(&candidate);

        log::debug!(
            "Comparing [{}] with file name [{}]",
            normalized_title,
            normalized_candidate
        );

        if normalized_title == normalized_candidate {
            summary.matched += 1;
            continue;
        }

        log::info!(
            "Movie name mismatch: title [{}], file [{}]",
            movie.title,
            candidate
        );
        summary.mismatches.push(TitleMismatch {
            title: movie.title.clone(),
            candidate: candidate.clone(),
            file: file.to_string(),
        });

        if !apply_changes {
            continue;
        }

        match catalog.update_movie_title(movie, &candidate, &candidate) {
            Ok(()) => {
                log::info!("Renamed movie [{}] to [{}]", movie.title, candidate);
                summary.renamed += 1;
            }
            Err(e) => {
                log::error!("Failed to rename movie {}: {}", movie.title, e);
                summary.failures.push(ItemFailure {
                    title: movie.title.clone(),
                    error: e,
                });
            }
        }
    }

    log::info!(
        "Finished movie name enforcement, fixed {} movies",
        summary.renamed
    );

    summary
}
