//! JSON Ledger Repository
//!
//! Implements the LedgerRepository port as a single JSON document:
//!
//! ```json
//! { "1234": { "last_update_date": 1700000000 } }
//! ```
//!
//! Saves go through `atomic_write`, so a crash mid-save leaves the previous
//! ledger in place.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::Ledger;
use crate::domain::ports::{LedgerError, LedgerRepository, LedgerResult};
use crate::infrastructure::fs::atomic_write;

/// On-disk representation of one ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonLedgerEntry {
    last_update_date: i64,
}

type JsonLedger = BTreeMap<String, JsonLedgerEntry>;

/// JSON-file ledger repository
pub struct JsonLedgerRepository {
    path: PathBuf,
    bootstrap: bool,
}

impl JsonLedgerRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            bootstrap: true,
        }
    }

    /// Treat a missing file as an empty ledger without creating it.
    /// Used by read-only commands (`plan`, `ledger`).
    pub fn without_bootstrap(mut self) -> Self {
        self.bootstrap = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> LedgerError {
        LedgerError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Parse ledger JSON
pub fn parse_ledger(content: &str) -> Result<Ledger, serde_json::Error> {
    let parsed: JsonLedger = serde_json::from_str(content)?;
    Ok(parsed
        .into_iter()
        .map(|(id, entry)| (id, entry.last_update_date))
        .collect())
}

/// Serialize a ledger as pretty JSON, keys in id order
pub fn render_ledger(ledger: &Ledger) -> String {
    let doc: JsonLedger = ledger
        .entries()
        .map(|(id, freshness)| {
            (
                id.to_string(),
                JsonLedgerEntry {
                    last_update_date: freshness,
                },
            )
        })
        .collect();
    // A string-keyed map of plain structs can't fail to serialize
    let mut out = serde_json::to_string_pretty(&doc).unwrap_or_else(|_| "{}".to_string());
    out.push('\n');
    out
}

impl LedgerRepository for JsonLedgerRepository {
    fn load(&self) -> LedgerResult<Ledger> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty = Ledger::new();
                if !self.bootstrap {
                    return Ok(empty);
                }
                self.save(&empty)?;
                tracing::info!(path = %self.path.display(), "created empty ledger");
                return Ok(empty);
            }
            Err(e) => return Err(self.io_error(e)),
        };

        parse_ledger(&content).map_err(|e| LedgerError::Malformed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn save(&self, ledger: &Ledger) -> LedgerResult<()> {
        atomic_write(&self.path, render_ledger(ledger).as_bytes()).map_err(|e| self.io_error(e))
    }
}
