//! Atlas CLI - navigation engine for documentation corpora.
//!
//! Provides commands for:
//! - `serve`: Start the HTTP API
//! - `nav`: Print the navigation tree of a category
//! - `breadcrumbs`: Print the breadcrumb trail of a path
//! - `subjects`: Print the configured subjects
//! - `catalog`: Print the catalog merged with discovered categories
//! - `check`: Validate configuration, catalog and content

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BreadcrumbsArgs, CatalogArgs, CheckArgs, NavArgs, ServeArgs, SubjectsArgs};
use error::CliError;
use output::Output;

/// Atlas - navigation engine for documentation corpora.
#[derive(Parser)]
#[command(name = "atlas", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server.
    Serve(ServeArgs),
    /// Print the navigation tree of a category.
    Nav(NavArgs),
    /// Print the breadcrumb trail of a path.
    Breadcrumbs(BreadcrumbsArgs),
    /// Print the configured subjects.
    Subjects(SubjectsArgs),
    /// Print the catalog merged with categories discovered in content.
    Catalog(CatalogArgs),
    /// Validate configuration, catalog and content.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // Check if verbose flag is set for serve command
    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, output: &Output) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()?;
    match command {
        Commands::Serve(args) => rt.block_on(args.execute(output)),
        Commands::Nav(args) => rt.block_on(args.execute(output)),
        Commands::Breadcrumbs(args) => args.execute(output),
        Commands::Subjects(args) => args.execute(output),
        Commands::Catalog(args) => rt.block_on(args.execute(output)),
        Commands::Check(args) => rt.block_on(args.execute(output)),
    }
}
