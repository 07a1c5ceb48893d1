//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application: the
//! `Config` is read here once and each adapter receives only its own
//! section.

use secrecy::{ExposeSecret, SecretString};

use crate::application::{SyncOptions, SyncUseCase};
use crate::config::Config;
use crate::domain::services::RemoteNaming;
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::{
    load_friendly_names, JsonLedgerRepository, LocalStaging, RequestSigner, WebDavSink,
    WildlifeApiSource,
};

/// Type alias for the concrete SyncUseCase with all dependencies
pub type ConcreteSyncUseCase =
    SyncUseCase<WildlifeApiSource, WebDavSink, JsonLedgerRepository, LocalStaging>;

/// Create a sync use case with all dependencies wired up
pub fn create_sync_use_case(config: &Config) -> SyncResult<ConcreteSyncUseCase> {
    Ok(SyncUseCase::new(
        create_source(config)?,
        create_sink(config)?,
        create_ledger_repository(config),
        create_staging(config),
        create_naming(config),
    ))
}

/// Per-run options from the `[transfer]` section
pub fn sync_options(config: &Config) -> SyncOptions {
    SyncOptions::new()
        .with_max_rounds(config.transfer.max_rounds)
        .with_round_delay(config.transfer.round_delay())
}

/// Telemetry API client from the `[source]` section
pub fn create_source(config: &Config) -> SyncResult<WildlifeApiSource> {
    let source = &config.source;
    let access_key = required_secret(config, source.access_key.as_ref(), "source.access_key")?;
    let secret_key = required_secret(config, source.secret_key.as_ref(), "source.secret_key")?;

    WildlifeApiSource::new(
        source.api_url.clone(),
        source.owner_id.clone(),
        RequestSigner::new(access_key, secret_key),
        source.timeout(),
    )
    .map_err(SyncError::from)
}

/// WebDAV client from the `[sink]` section
pub fn create_sink(config: &Config) -> SyncResult<WebDavSink> {
    let sink = &config.sink;
    let base_url = sink
        .base_url
        .as_deref()
        .ok_or_else(|| missing(config, "sink.base_url"))?;
    let username = sink
        .username
        .clone()
        .ok_or_else(|| missing(config, "sink.username"))?;
    let password = required_secret(config, sink.password.as_ref(), "sink.password")?;

    WebDavSink::new(base_url, username, password, sink.timeout()).map_err(|e| {
        SyncError::SinkUnavailable {
            message: e.to_string(),
        }
    })
}

pub fn create_ledger_repository(config: &Config) -> JsonLedgerRepository {
    JsonLedgerRepository::new(config.storage.ledger_file())
}

pub fn create_staging(config: &Config) -> LocalStaging {
    LocalStaging::new(
        config.storage.staging_dir(),
        config.storage.artifact_extension.clone(),
    )
}

/// Remote naming with the optional friendly-name mapping applied
pub fn create_naming(config: &Config) -> RemoteNaming {
    let mapping = config.storage.name_mapping();
    RemoteNaming::new(
        config.sink.remote_dir.clone(),
        config.storage.artifact_extension.trim_start_matches('.'),
    )
    .with_friendly_names(load_friendly_names(Some(&mapping)))
}

fn required_secret(
    config: &Config,
    secret: Option<&SecretString>,
    key: &str,
) -> SyncResult<SecretString> {
    secret
        .map(|s| SecretString::from(s.expose_secret().to_string()))
        .ok_or_else(|| missing(config, key))
}

fn missing(config: &Config, key: &str) -> SyncError {
    SyncError::InvalidConfig {
        file: config.origin.clone().unwrap_or_default(),
        message: format!("missing required setting {}", key),
    }
}
