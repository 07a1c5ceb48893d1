//! `plan` - show what the next run would fetch

use std::process::ExitCode;

use anyhow::{Context, Result};

use deployment_sync::application::preview;
use deployment_sync::config::Config;
use deployment_sync::presentation::{factory, output, TextRenderer};
use deployment_sync::SyncError;

pub fn cmd_plan(config: &Config, json: bool) -> Result<ExitCode> {
    config.validate(false).map_err(SyncError::from)?;

    let source = factory::create_source(config)?;
    let ledger_repo = factory::create_ledger_repository(config).without_bootstrap();

    let plan = preview(&source, &ledger_repo).context("cannot list deployments")?;

    if json {
        println!("{}", output::plan_json(&plan));
    } else {
        print!("{}", TextRenderer::default().render_plan(&plan));
    }
    Ok(ExitCode::SUCCESS)
}
