//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use secrecy::SecretString;

use super::types::{Config, Verbosity};
use super::ConfigError;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "DEPLOYMENT_SYNC_";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let mut config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    config.origin = Some(path.to_path_buf());

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Default config location: `~/.config/deployment-sync/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("deployment-sync").join("config.toml"))
}

/// Apply `DEPLOYMENT_SYNC_*` overrides, reading variables through `lookup`
pub fn with_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| {
        lookup(&format!("{}{}", ENV_PREFIX, name)).filter(|v| !v.is_empty())
    };

    if let Some(key) = var("ACCESS_KEY") {
        config.source.access_key = Some(SecretString::from(key));
    }
    if let Some(key) = var("SECRET_KEY") {
        config.source.secret_key = Some(SecretString::from(key));
    }
    if let Some(url) = var("API_URL") {
        config.source.api_url = url;
    }
    if let Some(url) = var("SINK_URL") {
        config.sink.base_url = Some(url);
    }
    if let Some(user) = var("SINK_USER") {
        config.sink.username = Some(user);
    }
    if let Some(password) = var("SINK_PASSWORD") {
        config.sink.password = Some(SecretString::from(password));
    }
    if let Some(rounds) = var("MAX_ROUNDS") {
        match rounds.trim().parse() {
            Ok(rounds) => config.transfer.max_rounds = rounds,
            Err(_) => tracing::warn!(value = %rounds, "ignoring invalid {}MAX_ROUNDS", ENV_PREFIX),
        }
    }
    if let Some(verbosity) = var("VERBOSITY") {
        match Verbosity::parse(&verbosity) {
            Some(level) => config.output.verbosity = level,
            None => {
                tracing::warn!(value = %verbosity, "ignoring invalid {}VERBOSITY", ENV_PREFIX)
            }
        }
    }

    config
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "source",
        "api_url",
        "access_key",
        "secret_key",
        "owner_id",
        "timeout_secs",
        "sink",
        "base_url",
        "username",
        "password",
        "remote_dir",
        "storage",
        "state_dir",
        "staging_dir",
        "ledger_file",
        "name_mapping",
        "artifact_extension",
        "transfer",
        "max_rounds",
        "round_delay_ms",
        "output",
        "verbosity",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
