//! Furluna CLI - Command-line interface
//!
//! Runs the site server and the hospital listing tools.

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use furluna_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "furluna")]
#[command(about = "Pet-care site server with a nearby vet hospital listing")]
struct Cli {
    /// Console log level (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value_t = CliLogLevel::default(), global = true)]
    log_level: CliLogLevel,

    /// Directory for the run log
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,

    /// Use demo hospitals instead of the places API
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_tracing_level(), cli.logs_dir.as_deref())
        .context("failed to initialize logging")?;

    commands::handle_command(cli.command, cli.demo).await
}
