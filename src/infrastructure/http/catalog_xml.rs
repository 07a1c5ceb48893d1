//! Catalog XML parsing
//!
//! The `get_deployments` response looks like
//!
//! ```xml
//! <deployments>
//!   <deployment>
//!     <id>1234</id>
//!     <last_update_date>1700000000</last_update_date>
//!     ...
//!   </deployment>
//! </deployments>
//! ```
//!
//! Only `id` and `last_update_date` that are direct children of a top-level
//! `deployment` element are read. Incomplete entries are skipped, not fatal.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::domain::entities::DeploymentSummary;
use crate::domain::ports::SourceError;

/// Parsed catalog plus the number of unusable entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogParse {
    pub deployments: Vec<DeploymentSummary>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    LastUpdate,
}

#[derive(Debug, Default)]
struct PartialEntry {
    id: String,
    last_update: String,
}

impl PartialEntry {
    fn finish(self) -> Result<DeploymentSummary, String> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err("deployment without id".to_string());
        }
        let freshness = self.last_update.trim().parse::<i64>().map_err(|_| {
            format!(
                "deployment {} has unusable last_update_date '{}'",
                id,
                self.last_update.trim()
            )
        })?;
        Ok(DeploymentSummary::new(id, freshness))
    }
}

/// Parse a `get_deployments` response body
pub fn parse_catalog(xml: &[u8]) -> Result<CatalogParse, SourceError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut parsed = CatalogParse::default();

    let mut depth = 0usize;
    let mut current: Option<PartialEntry> = None;
    let mut field: Option<Field> = None;
    let mut saw_root = false;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            SourceError::InvalidResponse(format!(
                "catalog XML error at byte {}: {}",
                reader.error_position(),
                e
            ))
        })?;

        match event {
            Event::Start(e) => {
                depth += 1;
                saw_root = true;
                let name = e.local_name();
                match depth {
                    2 if name.as_ref() == b"deployment" => {
                        current = Some(PartialEntry::default());
                    }
                    3 if current.is_some() => {
                        field = match name.as_ref() {
                            b"id" => Some(Field::Id),
                            b"last_update_date" => Some(Field::LastUpdate),
                            _ => None,
                        };
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => {
                saw_root = true;
                if depth == 1 && e.local_name().as_ref() == b"deployment" {
                    parsed.skipped += 1;
                    tracing::warn!("skipping empty deployment element");
                }
            }
            Event::Text(e) => {
                if let (Some(entry), Some(f), 3) = (current.as_mut(), field, depth) {
                    let text = e.unescape().map_err(|err| {
                        SourceError::InvalidResponse(format!("catalog XML text: {}", err))
                    })?;
                    push_text(entry, f, &text);
                }
            }
            Event::CData(e) => {
                if let (Some(entry), Some(f), 3) = (current.as_mut(), field, depth) {
                    let bytes = e.into_inner();
                    push_text(entry, f, &String::from_utf8_lossy(&bytes));
                }
            }
            Event::End(_) => {
                if depth == 3 {
                    field = None;
                }
                if depth == 2 {
                    if let Some(entry) = current.take() {
                        match entry.finish() {
                            Ok(summary) => parsed.deployments.push(summary),
                            Err(reason) => {
                                parsed.skipped += 1;
                                tracing::warn!(%reason, "skipping catalog entry");
                            }
                        }
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(SourceError::InvalidResponse(
            "catalog response has no XML root element".to_string(),
        ));
    }

    Ok(parsed)
}

fn push_text(entry: &mut PartialEntry, field: Field, text: &str) {
    match field {
        Field::Id => entry.id.push_str(text),
        Field::LastUpdate => entry.last_update.push_str(text),
    }
}
