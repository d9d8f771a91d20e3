// FILE: crates/cli/src/main.rs

use anyhow::Result;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use plex_cleanup_config::{default_config_path, DEFAULT_CONFIG_FILE};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod commands;
mod logging;

fn build_cli() -> Command {
    Command::new("plex-cleanup")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Removes undersized Plex collections and keeps movie titles in line with file names")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to the configuration file (.toml or .json)")
                .default_value(DEFAULT_CONFIG_FILE)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .help("Append log output to a file instead of stderr")
                .global(true),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .help("Report what would change without changing anything")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .value_name("MINUTES")
                .help("Keep running, waiting this many minutes between runs")
                .value_parser(clap::value_parser!(u64).range(1..=10_080)),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .help("HTTP request timeout")
                .value_parser(clap::value_parser!(u64).range(1..=3_600))
                .default_value("30"),
        )
        .subcommand(
            Command::new("init")
                .about("Write a configuration template")
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .help("Overwrite an existing configuration")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("validate").about("Check the configuration file"))
}

/// Config named with --config, or the default lookup in `dir`
fn resolve_config_path(matches: &ArgMatches, dir: &Path) -> PathBuf {
    match matches.get_one::<String>("config") {
        Some(path) if matches.value_source("config") != Some(ValueSource::DefaultValue) => {
            PathBuf::from(path)
        }
        _ => default_config_path(dir),
    }
}

fn run_options(matches: &ArgMatches, config_path: PathBuf) -> commands::RunOptions {
    commands::RunOptions {
        config_path,
        dry_run: matches.get_flag("dry-run"),
        interval: matches.get_one::<u64>("interval").copied(),
        timeout: Duration::from_secs(matches.get_one::<u64>("timeout").copied().unwrap_or(30)),
    }
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    logging::init_logging(
        matches.get_flag("verbose"),
        matches.get_one::<String>("log-file").map(Path::new),
    )?;

    let config_path = resolve_config_path(&matches, Path::new("."));

    match matches.subcommand() {
        Some(("init", sub_matches)) => commands::init_config(&config_path, sub_matches.get_flag("force")),
        Some(("validate", _)) => commands::validate_config(&config_path),
        _ => commands::run(&run_options(&matches, config_path)),
    }
}
