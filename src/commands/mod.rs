//! Subcommand implementations for the `deployment-sync` binary

pub mod init;
pub mod ledger;
pub mod plan;
pub mod run;

use std::path::Path;

use anyhow::Result;

use deployment_sync::config::{default_config_path, Config, ConfigWarning};
use deployment_sync::SyncError;

/// Catalog unavailable, invalid config, or any other aborted command
pub const EXIT_FAILURE: u8 = 1;

/// `run --strict` finished but some deployment failed to download or upload
pub const EXIT_ITEM_FAILURES: u8 = 2;

/// Config plus the non-fatal warnings found while reading it
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
}

/// Resolve and load the configuration, then apply environment overrides.
///
/// An explicit `--config` path must exist. The default location is optional:
/// without it the built-in defaults plus environment variables are used.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|p| p.exists()),
    };

    let (config, warnings) = match path {
        Some(path) => Config::load_with_warnings(&path).map_err(SyncError::from)?,
        None => (Config::default(), Vec::new()),
    };

    Ok(LoadedConfig {
        config: config.with_env_overrides(),
        warnings,
    })
}
