//! Deployment name mapping
//!
//! Optional JSON file giving deployments a human-readable name used in the
//! remote file name:
//!
//! ```json
//! { "1234": { "friendly_name": "North Reef" } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct MappingEntry {
    #[serde(default)]
    friendly_name: Option<String>,
}

/// Parse mapping JSON into id -> friendly name, dropping blank names
pub fn parse_name_mapping(content: &str) -> Result<BTreeMap<String, String>, serde_json::Error> {
    let raw: BTreeMap<String, MappingEntry> = serde_json::from_str(content)?;
    Ok(raw
        .into_iter()
        .filter_map(|(id, entry)| {
            entry
                .friendly_name
                .filter(|name| !name.trim().is_empty())
                .map(|name| (id, name))
        })
        .collect())
}

/// Load the mapping file, if any.
///
/// Missing file means no names. An unreadable or malformed file is logged
/// and treated as empty; remote names then fall back to the bare id.
pub fn load_friendly_names(path: Option<&Path>) -> BTreeMap<String, String> {
    let Some(path) = path else {
        return BTreeMap::new();
    };

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no name mapping file");
            return BTreeMap::new();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read name mapping");
            return BTreeMap::new();
        }
    };

    match parse_name_mapping(&content) {
        Ok(names) => {
            tracing::debug!(path = %path.display(), count = names.len(), "loaded name mapping");
            names
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed name mapping");
            BTreeMap::new()
        }
    }
}
