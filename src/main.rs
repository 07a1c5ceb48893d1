//! deployment-sync CLI
//!
//! Usage: deployment-sync [--config PATH] [--json] [-v...] <COMMAND>
//!
//! Commands:
//!   run     List, fetch new/updated deployments, upload them
//!   plan    Preview what the next run would fetch
//!   ledger  Print the freshness ledger
//!   init    Write a config template

mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use deployment_sync::config::{Config, Verbosity};
use deployment_sync::presentation::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { force } => {
            init_tracing(Verbosity::default().raised(cli.verbose));
            commands::init::cmd_init(cli.config.as_deref(), force, cli.json)
        }
        Commands::Run { strict } => with_config(&cli, |config| {
            commands::run::cmd_run(config, strict, cli.json, cli.verbose)
        }),
        Commands::Plan => with_config(&cli, |config| commands::plan::cmd_plan(config, cli.json)),
        Commands::Ledger => {
            with_config(&cli, |config| commands::ledger::cmd_ledger(config, cli.json))
        }
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(commands::EXIT_FAILURE)
        }
    }
}

/// Load the config, set up logging, then hand over to the command
fn with_config<F>(cli: &Cli, command: F) -> anyhow::Result<ExitCode>
where
    F: FnOnce(&Config) -> anyhow::Result<ExitCode>,
{
    let loaded = commands::load_config(cli.config.as_deref())?;
    init_tracing(loaded.config.output.verbosity.raised(cli.verbose));
    for warning in &loaded.warnings {
        tracing::warn!("{}", warning);
    }
    command(&loaded.config)
}

/// Logs go to stderr; `RUST_LOG` wins over `-v` and the config verbosity
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
