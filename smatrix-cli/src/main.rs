//! smatrix: Interactive front end for the SMATRIX-RS storage engine.
//!
//! CLI entry point using clap for argument parsing.

mod commands;
mod console;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use smatrix_store::EngineConfig;

#[derive(Parser)]
#[command(
    name = "smatrix",
    version,
    about = "SMATRIX-RS: Orthogonal-list sparse matrix workbench",
    long_about = "Create a sparse matrix and insert, look up, resize and transpose it,\n\
                   either from an interactive menu or from a list of operations."
)]
struct Cli {
    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON engine configuration (growth policy, render format)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Menu-driven session: C)reate, I)nsert, D)uplicate, R)esize, T)ranspose, Q)uit
    Interactive(commands::interactive::InteractiveArgs),

    /// Apply a list of operations to a new matrix and print the result
    Apply(commands::apply::ApplyArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("SMATRIX-RS v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    tracing::info!("Growth policy: {:?}", config.growth);

    match cli.command {
        Some(Commands::Interactive(args)) => commands::interactive::run(args, &config),
        Some(Commands::Apply(args)) => commands::apply::run(args, &config),
        None => commands::interactive::run(Default::default(), &config),
    }
}
