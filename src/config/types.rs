//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use super::loader::{self, ConfigWarning};
use super::ConfigError;

/// Default Wildlife Computers API endpoint
pub const DEFAULT_API_URL: &str = "https://my.wildlifecomputers.com/services/";

/// Telemetry API settings
#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default, deserialize_with = "deserialize_secret")]
    pub access_key: Option<SecretString>,

    #[serde(default, deserialize_with = "deserialize_secret")]
    pub secret_key: Option<SecretString>,

    /// Restrict the catalog to one owner's deployments
    #[serde(default)]
    pub owner_id: Option<String>,

    #[serde(default = "default_source_timeout")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            access_key: None,
            secret_key: None,
            owner_id: None,
            timeout_secs: default_source_timeout(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_source_timeout() -> u64 {
    60
}

/// WebDAV store settings
#[derive(Debug, Deserialize)]
pub struct SinkConfig {
    /// WebDAV root, e.g. `https://cloud.example.org/remote.php/dav/files/<user>`
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "deserialize_secret")]
    pub password: Option<SecretString>,

    #[serde(default = "default_remote_dir")]
    pub remote_dir: String,

    #[serde(default = "default_sink_timeout")]
    pub timeout_secs: u64,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            username: None,
            password: None,
            remote_dir: default_remote_dir(),
            timeout_secs: default_sink_timeout(),
        }
    }
}

impl SinkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_remote_dir() -> String {
    "/SAPRI Deployment Data".to_string()
}

fn default_sink_timeout() -> u64 {
    300
}

/// Local state and staging locations
///
/// Relative `staging_dir`, `ledger_file` and `name_mapping` paths are
/// resolved against `state_dir`.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    #[serde(default)]
    pub staging_dir: Option<PathBuf>,

    #[serde(default)]
    pub ledger_file: Option<PathBuf>,

    #[serde(default)]
    pub name_mapping: Option<PathBuf>,

    #[serde(default = "default_extension")]
    pub artifact_extension: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            staging_dir: None,
            ledger_file: None,
            name_mapping: None,
            artifact_extension: default_extension(),
        }
    }
}

impl StorageConfig {
    pub fn state_dir(&self) -> PathBuf {
        loader::expand_home(&self.state_dir)
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.resolve(self.staging_dir.as_deref(), "data")
    }

    pub fn ledger_file(&self) -> PathBuf {
        self.resolve(self.ledger_file.as_deref(), "deployment_info.json")
    }

    pub fn name_mapping(&self) -> PathBuf {
        self.resolve(self.name_mapping.as_deref(), "deployment_mapping.json")
    }

    fn resolve(&self, configured: Option<&Path>, default_name: &str) -> PathBuf {
        let path = configured.unwrap_or_else(|| Path::new(default_name));
        let path = loader::expand_home(path);
        if path.is_absolute() {
            path
        } else {
            self.state_dir().join(path)
        }
    }
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_extension() -> String {
    "zip".to_string()
}

/// Upload retry settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TransferConfig {
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    #[serde(default)]
    pub round_delay_ms: u64,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
            round_delay_ms: 0,
        }
    }
}

impl TransferConfig {
    pub fn round_delay(&self) -> Duration {
        Duration::from_millis(self.round_delay_ms)
    }
}

fn default_max_rounds() -> u32 {
    5
}

/// Output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Raise the level by `steps` (one per `-v` flag), saturating at Debug
    pub fn raised(self, steps: u8) -> Self {
        let mut level = self;
        for _ in 0..steps {
            level = match level {
                Verbosity::Quiet => Verbosity::Normal,
                Verbosity::Normal => Verbosity::Verbose,
                Verbosity::Verbose | Verbosity::Debug => Verbosity::Debug,
            };
        }
        level
    }

    /// Default `tracing` filter directive for this level
    pub fn filter_directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "warn",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
            Verbosity::Debug => "trace",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "debug" => Some(Verbosity::Debug),
            _ => None,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub sink: SinkConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub transfer: TransferConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// File this config was read from, if any
    #[serde(skip)]
    pub origin: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (DEPLOYMENT_SYNC_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_overrides(self, |key| std::env::var(key).ok())
    }

    /// Settings needed to talk to the telemetry API that are still missing
    pub fn missing_source_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.source.api_url.trim().is_empty() {
            missing.push("source.api_url");
        }
        if self.source.access_key.is_none() {
            missing.push("source.access_key");
        }
        if self.source.secret_key.is_none() {
            missing.push("source.secret_key");
        }
        missing
    }

    /// Settings needed to upload that are still missing
    pub fn missing_sink_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(self.sink.base_url.as_deref()) {
            missing.push("sink.base_url");
        }
        if is_blank(self.sink.username.as_deref()) {
            missing.push("sink.username");
        }
        if self.sink.password.is_none() {
            missing.push("sink.password");
        }
        missing
    }

    /// Check that everything a full run needs is present
    pub fn validate(&self, require_sink: bool) -> Result<(), ConfigError> {
        let mut missing = self.missing_source_settings();
        if require_sink {
            missing.extend(self.missing_sink_settings());
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Missing {
                file: self.origin.clone().unwrap_or_default(),
                keys: missing.iter().map(|k| k.to_string()).collect(),
            })
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|s| s.trim().is_empty()).unwrap_or(true)
}

/// Secrets come in as plain strings and are wrapped immediately; an empty
/// string counts as unset.
fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_empty()).map(SecretString::from))
}
