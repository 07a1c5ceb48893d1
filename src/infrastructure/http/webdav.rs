//! WebDAV artifact sink
//!
//! Implements the ArtifactSink port as a whole-file `PUT` with basic auth,
//! which is what Nextcloud and ownCloud expect. `201 Created` and
//! `204 No Content` (overwrite) count as success; anything else is a
//! failure left to the transfer queue's retry rounds.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::domain::ports::{ArtifactSink, SinkError, SinkResult};

/// HTTP adapter for a WebDAV file store
pub struct WebDavSink {
    client: Client,
    base_url: Url,
    username: String,
    password: SecretString,
}

impl WebDavSink {
    pub fn new(
        base_url: &str,
        username: impl Into<String>,
        password: SecretString,
        timeout: Duration,
    ) -> SinkResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SinkError::Transport(format!("invalid sink URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SinkError::Transport(format!(
                "sink URL '{}' cannot hold a path",
                base_url
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SinkError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url,
            username: username.into(),
            password,
        })
    }

    /// Full URL for a remote path; every segment is percent-encoded
    pub fn url_for(&self, remote_path: &str) -> SinkResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                SinkError::Transport(format!("sink URL '{}' cannot hold a path", self.base_url))
            })?;
            segments.pop_if_empty();
            segments.extend(remote_path.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url)
    }
}

impl std::fmt::Debug for WebDavSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDavSink")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl ArtifactSink for WebDavSink {
    fn store(&self, remote_path: &str, bytes: &[u8]) -> SinkResult<()> {
        let url = self.url_for(remote_path)?;
        tracing::debug!(%url, size = bytes.len(), "uploading");

        let response = self
            .client
            .put(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .body(bytes.to_vec())
            .send()
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::CREATED | StatusCode::NO_CONTENT => Ok(()),
            status => {
                let body = response.text().unwrap_or_default();
                Err(SinkError::Rejected {
                    status: status.as_u16(),
                    body: body.trim().chars().take(200).collect(),
                })
            }
        }
    }
}
