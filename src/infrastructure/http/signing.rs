//! Request signing for the Wildlife Computers API
//!
//! Every request body is a form-urlencoded parameter string. The service
//! authenticates it with an HMAC-SHA256 over exactly that string, keyed with
//! the account's secret key, hex encoded in `X-Hash`. The access key goes in
//! `X-Access`.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::domain::ports::SourceError;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the access key
pub const ACCESS_HEADER: &str = "X-Access";
/// Header carrying the hex HMAC of the body
pub const HASH_HEADER: &str = "X-Hash";

/// A signed form body plus its auth headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub body: String,
    pub access: String,
    pub hash: String,
}

/// Signs form parameters with the account key pair
pub struct RequestSigner {
    access_key: SecretString,
    secret_key: SecretString,
}

impl RequestSigner {
    pub fn new(access_key: SecretString, secret_key: SecretString) -> Self {
        Self {
            access_key,
            secret_key,
        }
    }

    /// Encode `params` in the given order and sign the result
    pub fn sign(&self, params: &[(&str, &str)]) -> Result<SignedRequest, SourceError> {
        let body = encode_params(params);
        let hash = hmac_hex(self.secret_key.expose_secret().as_bytes(), body.as_bytes())?;
        Ok(SignedRequest {
            body,
            access: self.access_key.expose_secret().to_string(),
            hash,
        })
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner").finish_non_exhaustive()
    }
}

/// Form-urlencode parameters, preserving order
pub fn encode_params(params: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

/// Hex HMAC-SHA256 of `message` under `key`
pub fn hmac_hex(key: &[u8], message: &[u8]) -> Result<String, SourceError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| SourceError::InvalidResponse(format!("invalid signing key: {}", e)))?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}
