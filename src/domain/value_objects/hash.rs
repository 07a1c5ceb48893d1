//! Content Hash Value Object
//!
//! A `sha256:`-prefixed digest of a staged artifact's bytes, recorded when the
//! artifact is staged and reported alongside fetch events.

use std::fmt;

use sha2::{Digest, Sha256};

/// SHA-256 digest of an artifact payload, stored as `sha256:<hex>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub const PREFIX: &'static str = "sha256:";

    pub fn from_bytes(content: &[u8]) -> Self {
        Self(format!("{}{}", Self::PREFIX, hex::encode(Sha256::digest(content))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digest without the prefix
    pub fn hex(&self) -> &str {
        &self.0[Self::PREFIX.len()..]
    }

    /// Prefix plus the first 12 hex chars, for log lines
    pub fn short(&self) -> &str {
        &self.0[..Self::PREFIX.len() + 12]
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_matches_known_digest() {
        let hash = ContentHash::from_bytes(b"hello");
        assert_eq!(
            hash.hex(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert!(hash.as_str().starts_with("sha256:"));
    }

    #[test]
    fn short_keeps_twelve_hex_chars() {
        let hash = ContentHash::from_bytes(b"hello");
        assert_eq!(hash.short(), "sha256:2cf24dba5fb0");
    }

    #[test]
    fn empty_payload_still_hashes() {
        let hash = ContentHash::from_bytes(b"");
        assert_eq!(hash.hex().len(), 64);
        assert_eq!(hash.to_string(), hash.as_str());
    }
}
