//! ArtifactSink port - the remote file store
//!
//! Whole-file, byte-range-free store semantics: one call uploads the
//! complete payload to a named remote path.

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Artifact sink errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// Connection, TLS, or timeout failure
    Transport(String),
    /// Store answered with something other than "created"/"no content"
    Rejected { status: u16, body: String },
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::Transport(msg) => write!(f, "transport error: {}", msg),
            SinkError::Rejected { status, body } if body.is_empty() => {
                write!(f, "upload rejected with status {}", status)
            }
            SinkError::Rejected { status, body } => {
                write!(f, "upload rejected with status {}: {}", status, body)
            }
        }
    }
}

impl std::error::Error for SinkError {}

/// Remote file store
pub trait ArtifactSink {
    /// Store `bytes` at `remote_path`, replacing whatever is there
    fn store(&self, remote_path: &str, bytes: &[u8]) -> SinkResult<()>;
}

impl<T: ArtifactSink + ?Sized> ArtifactSink for &T {
    fn store(&self, remote_path: &str, bytes: &[u8]) -> SinkResult<()> {
        (**self).store(remote_path, bytes)
    }
}
