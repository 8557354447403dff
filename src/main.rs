//! modgate CLI
//!
//! Usage: modgate <COMMAND>
//!
//! Commands:
//!   verify   Run verification passes and write reports
//!   modules  List discovered modules

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::{Cli, Commands};

fn init_logging(verbose: u8) {
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("modgate={}", level))
    });
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Verify {
            project,
            report_dir,
            passes,
        } => commands::verify::cmd_verify(
            &project,
            cli.config.as_deref(),
            report_dir,
            passes,
            cli.json,
        ),
        Commands::Modules { project } => {
            commands::modules::cmd_modules(&project, cli.config.as_deref(), cli.json)
        }
    }
}
