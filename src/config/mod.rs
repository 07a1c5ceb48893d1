//! Configuration module
//!
//! Precedence, highest first:
//! 1. CLI flags (`--config`, `-v`)
//! 2. Environment variables (DEPLOYMENT_SYNC_*)
//! 3. Config file (~/.config/deployment-sync/config.toml)
//! 4. Built-in defaults

mod loader;
mod types;

use std::path::PathBuf;

use thiserror::Error;

pub use loader::{default_config_path, expand_home, with_overrides, ConfigWarning, ENV_PREFIX};
pub use types::{
    Config, OutputConfig, SinkConfig, SourceConfig, StorageConfig, TransferConfig, Verbosity,
    DEFAULT_API_URL,
};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("missing required settings: {}", keys.join(", "))]
    Missing { file: PathBuf, keys: Vec<String> },
}

impl From<ConfigError> for crate::error::SyncError {
    fn from(err: ConfigError) -> Self {
        let file = match &err {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path.clone(),
            ConfigError::Missing { file, .. } => file.clone(),
        };
        crate::error::SyncError::InvalidConfig {
            file,
            message: err.to_string(),
        }
    }
}

/// Commented template written by `deployment-sync init`
pub const CONFIG_TEMPLATE: &str = r#"# deployment-sync configuration
#
# Secrets can also come from the environment:
#   DEPLOYMENT_SYNC_ACCESS_KEY, DEPLOYMENT_SYNC_SECRET_KEY,
#   DEPLOYMENT_SYNC_SINK_USER, DEPLOYMENT_SYNC_SINK_PASSWORD

[source]
api_url = "https://my.wildlifecomputers.com/services/"
access_key = ""
secret_key = ""
# owner_id = ""
timeout_secs = 60

[sink]
# base_url = "https://cloud.example.org/remote.php/dav/files/<user>"
# username = ""
# password = ""
remote_dir = "/SAPRI Deployment Data"
timeout_secs = 300

[storage]
state_dir = "."
# staging_dir = "data"
# ledger_file = "deployment_info.json"
# name_mapping = "deployment_mapping.json"
artifact_extension = "zip"

[transfer]
max_rounds = 5
round_delay_ms = 0

[output]
verbosity = "normal"
"#;
