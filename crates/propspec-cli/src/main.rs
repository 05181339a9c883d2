//! # propspec CLI entry point
//!
//! Parses command-line arguments, resolves settings, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use propspec_cli::check::run_check;
use propspec_cli::config::{ConfigFile, OutputFormat, Settings, DECLARATIONS_ENV};
use propspec_cli::describe::{run_describe, run_list, DescribeArgs};
use propspec_cli::validate::{run_validate, ValidateArgs};
use propspec_cli::EXIT_LOAD_FAILURE;

/// Property schema validator.
///
/// Checks the prop values supplied to a UI component against the
/// component's declared props and events.
#[derive(Parser, Debug)]
#[command(name = "propspec", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file. Defaults to `propspec.yaml` if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of component declarations.
    #[arg(long, global = true)]
    declarations: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a value set against one component.
    Validate(ValidateArgs),

    /// List declared components.
    List,

    /// Show a component's props and events.
    Describe(DescribeArgs),

    /// Check that the declaration directory builds a well-formed table.
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = match resolve_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(EXIT_LOAD_FAILURE);
        }
    };
    tracing::debug!(
        declarations = %settings.declarations.display(),
        format = ?settings.format,
        "resolved settings"
    );

    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, &settings),
        Commands::List => run_list(&settings),
        Commands::Describe(args) => run_describe(args, &settings),
        Commands::Check => run_check(&settings),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_LOAD_FAILURE)
        }
    }
}

/// Merge flags, config file and environment into effective settings.
fn resolve_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let file = ConfigFile::discover(cli.config.as_deref(), &cwd)?;
    Ok(Settings::resolve(
        cli.declarations.clone(),
        cli.format,
        file,
        std::env::var(DECLARATIONS_ENV).ok(),
    ))
}
