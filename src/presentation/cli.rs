//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--config, --json, --verbose) are inherited by all
//! subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// deployment-sync - mirror new telemetry deployments into a WebDAV store
#[derive(Parser, Debug)]
#[command(name = "deployment-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/deployment-sync/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit NDJSON events / JSON documents on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one sync: list, fetch new/updated deployments, upload
    Run {
        /// Exit with status 2 if any download or upload failed
        #[arg(long)]
        strict: bool,
    },

    /// Show what the next run would download, without changing anything
    Plan,

    /// Print the freshness ledger
    Ledger,

    /// Write a commented config file template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}
