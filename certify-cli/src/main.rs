//! Certify: batch certificate rendering and mailing CLI.
//!
//! # Usage
//!
//! ```text
//! certify render --roster <file> [--template <img>] [--workdir <dir>] [--json]
//! certify send [--roster <file>] [--workdir <dir>] [--dry-run] [--json]
//! certify run --roster <file> [--template <img>] [--workdir <dir>] [--dry-run] [--json]
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{render::RenderArgs, run::RunArgs, send::SendArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "certify",
    version,
    about = "Render personalized PDF certificates from a roster and email them",
    long_about = None,
)]
struct Cli {
    /// Path to a YAML config file (default: ./certify.yaml).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log progress to stderr (same as RUST_LOG=info).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render one certificate per roster row into the working directory.
    Render(RenderArgs),

    /// Email every rendered certificate to its recipient.
    Send(SendArgs),

    /// Render, then send, in one go.
    Run(RunArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Render(args) => args.run(&config),
        Commands::Send(args) => args.run(&config),
        Commands::Run(args) => args.run(&config),
    }
}
