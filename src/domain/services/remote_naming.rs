//! Remote naming
//!
//! Decides where in the file store a deployment's artifact lands:
//! `<remote_dir>/<id>_<friendly name>.<ext>`, or `<remote_dir>/<id>.<ext>`
//! when no friendly name is mapped for the id.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteNaming {
    remote_dir: String,
    extension: String,
    friendly_names: BTreeMap<String, String>,
}

impl RemoteNaming {
    pub fn new(remote_dir: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            remote_dir: remote_dir.into(),
            extension: extension.into(),
            friendly_names: BTreeMap::new(),
        }
    }

    pub fn with_friendly_names(mut self, names: BTreeMap<String, String>) -> Self {
        self.friendly_names = names;
        self
    }

    /// Remote path for a deployment, always absolute (`/`-rooted)
    pub fn remote_path(&self, deployment_id: &str) -> String {
        let dir = self.remote_dir.trim_matches('/');
        let stem = match self.friendly_name(deployment_id) {
            Some(name) => format!("{}_{}", deployment_id, name),
            None => deployment_id.to_string(),
        };
        let file = if self.extension.is_empty() {
            stem
        } else {
            format!("{}.{}", stem, self.extension)
        };

        if dir.is_empty() {
            format!("/{}", file)
        } else {
            format!("/{}/{}", dir, file)
        }
    }

    /// Mapped friendly name, sanitized for use in a single path segment
    fn friendly_name(&self, deployment_id: &str) -> Option<String> {
        let name = self.friendly_names.get(deployment_id)?.trim();
        if name.is_empty() {
            return None;
        }
        Some(name.replace(['/', '\\'], "-"))
    }
}
