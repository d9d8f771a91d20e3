// FILE: crates/cli/src/commands.rs

use anyhow::{bail, Context, Result};
use chrono::Local;
use console::style;
use plex_cleanup_config::{ConfigManager, LoadOutcome, Settings};
use plex_cleanup_maintenance::{run_once, RunContext, RunSummary};
use plex_cleanup_network::{ClientConfig, PlexCatalog};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Options for the maintenance run taken from the command line
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config_path: PathBuf,
    pub dry_run: bool,
    /// Minutes between runs; `None` runs once
    pub interval: Option<u64>,
    pub timeout: Duration,
}

/// Write a configuration template
pub fn init_config(config_path: &Path, force: bool) -> Result<()> {
    let manager = ConfigManager::with_path(config_path.to_path_buf());
    let written = manager
        .initialize(force)
        .context("Failed to write configuration template")?;

    if written {
        println!(
            "{} Configuration template written to {}",
            style("✓").green().bold(),
            config_path.display()
        );
        println!("  Fill in plex_url and api_key before running.");
    } else {
        println!(
            "Configuration already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    Ok(())
}

/// Check a configuration file without contacting the server
pub fn validate_config(config_path: &Path) -> Result<()> {
    let manager = ConfigManager::with_path(config_path.to_path_buf());
    let problems = manager
        .validate()
        .with_context(|| format!("Failed to read configuration {}", config_path.display()))?;

    if problems.is_empty() {
        println!("{} Configuration is valid", style("✓").green().bold());
        return Ok(());
    }

    println!("{}", style("Configuration problems").bold().red());
    for problem in &problems {
        println!("  - {}", problem);
    }
    bail!("{} configuration problem(s) found", problems.len())
}

/// Loads settings, connects to Plex and runs maintenance once or on an interval
pub fn run(options: &RunOptions) -> Result<()> {
    let Some(settings) = load_settings(&options.config_path)? else {
        return Ok(());
    };

    let client_config = ClientConfig {
        timeout: options.timeout,
        verify_certificates: settings.verify_certificates,
        ..ClientConfig::default()
    };
    let catalog = PlexCatalog::connect(&settings.plex_url, &settings.api_key, &client_config)
        .with_context(|| format!("Failed to connect to Plex at {}", settings.plex_url))?;

    println!(
        "Connected to {} {}",
        style(catalog.server_name()).bold().cyan(),
        catalog.server_version().unwrap_or_default()
    );

    let context = RunContext::new(&catalog, &settings).with_dry_run(options.dry_run);

    loop {
        let started = Local::now();
        log::info!("Starting maintenance run at {}", started.format("%Y-%m-%d %H:%M:%S"));

        let summary = run_once(&context).context("Maintenance run failed")?;
        print_summary(&summary, &context);

        let Some(minutes) = options.interval else {
            break;
        };

        let next = Local::now() + chrono::Duration::minutes(minutes as i64);
        println!(
            "\nNext run at {}",
            style(next.format("%Y-%m-%d %H:%M:%S")).bold()
        );
        std::thread::sleep(interval_duration(minutes));
    }

    Ok(())
}

/// Returns `None` when a template was created and there is nothing to run
fn load_settings(config_path: &Path) -> Result<Option<Settings>> {
    let manager = ConfigManager::with_path(config_path.to_path_buf());

    match manager.load() {
        LoadOutcome::Loaded(settings) => Ok(Some(settings)),
        LoadOutcome::Created(path) => {
            println!(
                "{} No configuration found, a template was written to {}",
                style("!").yellow().bold(),
                path.display()
            );
            println!("  Fill in plex_url and api_key, then run again.");
            Ok(None)
        }
        LoadOutcome::Invalid(error) => Err(error)
            .with_context(|| format!("Invalid configuration in {}", config_path.display())),
    }
}

pub fn interval_duration(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}

fn mode_label(enabled: bool, dry_run: bool) -> &'static str {
    match (enabled, dry_run) {
        (_, true) => "dry run",
        (true, false) => "enforced",
        (false, false) => "report only",
    }
}

/// Plain-text summary lines, shared by the printer and tests
pub fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Collections: {} seen, {} undersized",
            summary.collections.total_seen,
            summary.collections.undersized.len()
        ),
        format!(
            "  deleted {}, reported {}, failed {}",
            summary.disposition.deleted.len(),
            summary.disposition.reported.len(),
            summary.disposition.failures.len()
        ),
        format!(
            "Movies: {} examined, {} excluded, {} matched, {} mismatched",
            summary.titles.examined,
            summary.titles.excluded,
            summary.titles.matched,
            summary.titles.mismatches.len()
        ),
        format!(
            "  renamed {}, failed {}",
            summary.titles.renamed,
            summary.titles.failures.len()
        ),
    ];

    for failure in summary
        .collections
        .failures
        .iter()
        .chain(summary.movies.failures.iter())
    {
        lines.push(format!("Library {} failed: {}", failure.library, failure.error));
    }

    lines
}

fn print_summary(summary: &RunSummary, context: &RunContext<'_>) {
    let settings = context.settings;

    println!("\n{}", style("Maintenance Summary").bold().cyan());
    println!("{}", "=".repeat(60));
    println!(
        "Collection filter: {}",
        style(mode_label(settings.delete_undersized_collections, context.dry_run)).bold()
    );
    println!(
        "Title enforcement: {}",
        style(mode_label(
            settings.enforce_movie_names_match_file_names,
            context.dry_run
        ))
        .bold()
    );

    for line in summary_lines(summary) {
        println!("{}", line);
    }

    for mismatch in &summary.titles.mismatches {
        println!(
            "  {} {} -> {}",
            style("≠").yellow(),
            mismatch.title,
            style(&mismatch.candidate).bold()
        );
    }

    if summary.token_rejected() {
        println!(
            "{} Plex rejected the API key; update api_key in the configuration",
            style("✗").red().bold()
        );
    }

    let failures = summary.failure_count();
    if failures == 0 {
        println!("{} Finished without errors", style("✓").green().bold());
    } else {
        println!(
            "{} Finished with {} error(s), see the log for details",
            style("✗").red().bold(),
            failures
        );
    }
}
