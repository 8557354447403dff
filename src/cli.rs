use std::path::PathBuf;

use clap::{Parser, Subcommand};
use modgate::PassId;

/// modgate - build-contract verification for multi-module plugin projects
#[derive(Parser, Debug)]
#[command(name = "modgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to <project>/modgate.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run verification passes and write reports (exits non-zero on errors)
    Verify {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Report output directory (relative to the project root)
        #[arg(long)]
        report_dir: Option<PathBuf>,

        /// Passes to run (default: all)
        #[arg(long = "pass", value_delimiter = ',')]
        passes: Vec<PassId>,
    },

    /// List discovered modules and their attributes
    Modules {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },
}
