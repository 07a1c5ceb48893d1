//! `ledger` - print the freshness ledger

use std::process::ExitCode;

use anyhow::Result;

use deployment_sync::config::Config;
use deployment_sync::domain::ports::LedgerRepository;
use deployment_sync::presentation::{factory, output, TextRenderer};
use deployment_sync::SyncError;

pub fn cmd_ledger(config: &Config, json: bool) -> Result<ExitCode> {
    let repo = factory::create_ledger_repository(config).without_bootstrap();
    let ledger = repo.load().map_err(SyncError::from)?;

    if json {
        println!("{}", output::ledger_json(&ledger));
    } else {
        tracing::debug!(path = %repo.path().display(), "ledger");
        print!("{}", TextRenderer::default().render_ledger(&ledger));
    }
    Ok(ExitCode::SUCCESS)
}
