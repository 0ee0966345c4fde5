//! Gantry CLI - command-line entry point.

use anyhow::Result;
use clap::Parser;

use gantry_cli::{Cli, Commands};
use gantry_core::{LogFormat, init_logging};

fn main() -> Result<()> {
    init_logging(LogFormat::from_env());

    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match cli.command {
            Commands::Send(args) => gantry_cli::commands::send::execute(args).await,
        }
    })
}
