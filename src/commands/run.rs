//! `run` - one full sync run

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};

use deployment_sync::config::Config;
use deployment_sync::domain::ports::SyncEventSink;
use deployment_sync::infrastructure::{JsonEventSink, RunLock, TracingEventSink};
use deployment_sync::presentation::{factory, TextRenderer};
use deployment_sync::SyncError;

use super::EXIT_ITEM_FAILURES;

pub fn cmd_run(config: &Config, strict: bool, json: bool, verbose: u8) -> Result<ExitCode> {
    config.validate(true).map_err(SyncError::from)?;

    let _lock = RunLock::acquire(&config.storage.state_dir())?;
    let use_case = factory::create_sync_use_case(config)?;

    let events: Arc<dyn SyncEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(TracingEventSink::new())
    };

    let summary = use_case
        .run_with_events(&factory::sync_options(config), events)
        .context("sync run aborted")?;

    if !json {
        let renderer = TextRenderer {
            unicode: true,
            verbose,
        };
        print!("{}", renderer.render_summary(&summary));
    }

    let item_failures = !summary.fetch_failures.is_empty() || summary.transfer_failed() > 0;
    if strict && item_failures {
        return Ok(ExitCode::from(EXIT_ITEM_FAILURES));
    }
    Ok(ExitCode::SUCCESS)
}
