//! Wildlife Computers API source
//!
//! Implements the DeploymentSource port against the Wildlife Computers data
//! portal. Every call is a signed form POST to one endpoint; the `action`
//! parameter selects the operation.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::domain::entities::DeploymentSummary;
use crate::domain::ports::{DeploymentSource, SourceError, SourceResult};

use super::catalog_xml::parse_catalog;
use super::signing::{RequestSigner, ACCESS_HEADER, HASH_HEADER};

/// Longest response body excerpt kept in error messages
const ERROR_BODY_LIMIT: usize = 200;

/// HTTP adapter for the Wildlife Computers API
#[derive(Debug)]
pub struct WildlifeApiSource {
    client: Client,
    api_url: String,
    owner_id: Option<String>,
    signer: RequestSigner,
}

impl WildlifeApiSource {
    pub fn new(
        api_url: impl Into<String>,
        owner_id: Option<String>,
        signer: RequestSigner,
        timeout: Duration,
    ) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            owner_id: owner_id.filter(|o| !o.is_empty()),
            signer,
        })
    }

    /// Form parameters for the catalog listing, in the order they are signed
    pub fn list_params(&self) -> Vec<(&str, &str)> {
        let mut params = vec![("action", "get_deployments")];
        if let Some(owner) = &self.owner_id {
            params.push(("owner_id", owner.as_str()));
        }
        params
    }

    fn post(&self, params: &[(&str, &str)]) -> SourceResult<Vec<u8>> {
        let signed = self.signer.sign(params)?;

        let response = self
            .client
            .post(&self.api_url)
            .header(ACCESS_HEADER, signed.access)
            .header(HASH_HEADER, signed.hash)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(signed.body)
            .send()
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(SourceError::Status {
                code: status.as_u16(),
                body: excerpt(&body),
            });
        }
        Ok(body.to_vec())
    }
}

impl DeploymentSource for WildlifeApiSource {
    fn list_deployments(&self) -> SourceResult<Vec<DeploymentSummary>> {
        let body = self.post(&self.list_params())?;
        let parsed = parse_catalog(&body)?;
        if parsed.skipped > 0 {
            tracing::warn!(skipped = parsed.skipped, "catalog had unusable entries");
        }
        tracing::debug!(count = parsed.deployments.len(), "catalog parsed");
        Ok(parsed.deployments)
    }

    fn fetch_artifact(&self, deployment_id: &str) -> SourceResult<Vec<u8>> {
        tracing::debug!(%deployment_id, "downloading deployment");
        self.post(&[("action", "download_deployment"), ("id", deployment_id)])
    }
}

fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    match text.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn source(owner: Option<&str>) -> WildlifeApiSource {
        WildlifeApiSource::new(
            "http://127.0.0.1:9/services/",
            owner.map(str::to_string),
            RequestSigner::new(SecretString::from("ak"), SecretString::from("sk")),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn list_params_include_owner_when_configured() {
        let src = source(Some("abc"));
        assert_eq!(
            src.list_params(),
            vec![("action", "get_deployments"), ("owner_id", "abc")]
        );
    }

    #[test]
    fn empty_owner_is_omitted() {
        let src = source(Some(""));
        assert_eq!(src.list_params(), vec![("action", "get_deployments")]);
    }

    #[test]
    fn unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) is not listening on loopback in test environments
        let err = source(None).list_deployments().unwrap_err();
        assert!(matches!(err, SourceError::Transport(_)));
    }

    #[test]
    fn excerpt_truncates_long_bodies() {
        let long = "x".repeat(500);
        let cut = excerpt(long.as_bytes());
        assert!(cut.ends_with("..."));
        assert_eq!(cut.len(), ERROR_BODY_LIMIT + 3);
        assert_eq!(excerpt(b"  short \n"), "short");
    }
}
