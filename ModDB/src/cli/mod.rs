//! `ModDB` CLI - command-line interface for mod projects

pub mod commands;

use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "moddb")]
#[command(about = "ModDB: build and validate BG3 mod content", long_about = None)]
#[command(version)]
struct Cli {
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Run the `ModDB` CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; RUST_LOG overrides the default level
    let default_level = if cli.quiet { "error" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    cli.command.execute()?;

    Ok(())
}
