//! JSON Event Sink
//!
//! Outputs sync events as NDJSON for cron wrappers and automation.

use crate::domain::ports::{SyncEvent, SyncEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl SyncEventSink for JsonEventSink {
    fn on_event(&self, event: SyncEvent) {
        let json = match event {
            SyncEvent::Started { ledger_entries } => serde_json::json!({
                "event": "start",
                "command": "run",
                "ledger_entries": ledger_entries,
            }),

            SyncEvent::LedgerDegraded { error } => serde_json::json!({
                "event": "ledger_degraded",
                "command": "run",
                "error": error,
            }),

            SyncEvent::CatalogUnavailable { error } => serde_json::json!({
                "event": "catalog_unavailable",
                "command": "run",
                "error": error,
            }),

            SyncEvent::CatalogListed { count } => serde_json::json!({
                "event": "catalog_listed",
                "command": "run",
                "count": count,
            }),

            SyncEvent::Planned {
                to_fetch,
                up_to_date,
            } => serde_json::json!({
                "event": "planned",
                "command": "run",
                "to_fetch": to_fetch,
                "up_to_date": up_to_date,
            }),

            SyncEvent::Fetched {
                deployment_id,
                path,
                size,
                hash,
                previous,
                freshness,
            } => serde_json::json!({
                "event": "item_fetched",
                "command": "run",
                "deployment_id": deployment_id,
                "path": path.display().to_string(),
                "size": size,
                "hash": hash,
                "previous": previous,
                "freshness": freshness,
            }),

            SyncEvent::FetchFailed {
                deployment_id,
                error,
            } => serde_json::json!({
                "event": "item_fetch_error",
                "command": "run",
                "deployment_id": deployment_id,
                "error": error,
            }),

            SyncEvent::LedgerSaved { entries } => serde_json::json!({
                "event": "ledger_saved",
                "command": "run",
                "entries": entries,
            }),

            SyncEvent::LedgerSaveFailed { error } => serde_json::json!({
                "event": "ledger_save_error",
                "command": "run",
                "error": error,
            }),

            SyncEvent::StagingScanFailed { error } => serde_json::json!({
                "event": "staging_scan_error",
                "command": "run",
                "error": error,
            }),

            SyncEvent::CarriedOver {
                deployment_id,
                path,
            } => serde_json::json!({
                "event": "item_carried_over",
                "command": "run",
                "deployment_id": deployment_id,
                "path": path.display().to_string(),
            }),

            SyncEvent::Uploaded {
                deployment_id,
                remote_path,
                round,
            } => serde_json::json!({
                "event": "item_uploaded",
                "command": "run",
                "deployment_id": deployment_id,
                "remote_path": remote_path,
                "round": round,
            }),

            SyncEvent::UploadFailed {
                deployment_id,
                round,
                error,
                permanent,
            } => serde_json::json!({
                "event": "item_upload_error",
                "command": "run",
                "deployment_id": deployment_id,
                "round": round,
                "error": error,
                "permanent": permanent,
            }),

            SyncEvent::RoundCompleted { round, pending } => serde_json::json!({
                "event": "round_complete",
                "command": "run",
                "round": round,
                "pending": pending,
            }),

            SyncEvent::StagedRemoved { deployment_id } => serde_json::json!({
                "event": "item_cleaned",
                "command": "run",
                "deployment_id": deployment_id,
            }),

            SyncEvent::CleanupFailed {
                deployment_id,
                error,
            } => serde_json::json!({
                "event": "item_cleanup_error",
                "command": "run",
                "deployment_id": deployment_id,
                "error": error,
            }),

            SyncEvent::Completed {
                fetched,
                fetch_failed,
                transferred,
                transfer_failed,
            } => {
                let status = if fetch_failed == 0 && transfer_failed == 0 {
                    "success"
                } else {
                    "partial"
                };
                serde_json::json!({
                    "event": "complete",
                    "command": "run",
                    "status": status,
                    "fetched": fetched,
                    "fetch_errors": fetch_failed,
                    "transferred": transferred,
                    "transfer_errors": transfer_failed,
                })
            }
        };

        self.write_event(json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl TestWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    buffer: buffer.clone(),
                },
                buffer,
            )
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lines(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<serde_json::Value> {
        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn json_sink_outputs_one_object_per_line() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(SyncEvent::Started { ledger_entries: 4 });
        sink.on_event(SyncEvent::CatalogListed { count: 7 });

        let events = lines(&buffer);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["event"], "start");
        assert_eq!(events[0]["ledger_entries"], 4);
        assert_eq!(events[1]["count"], 7);
    }

    #[test]
    fn json_sink_outputs_fetched_item() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(SyncEvent::Fetched {
            deployment_id: "1234".to_string(),
            path: PathBuf::from("data/1234.zip"),
            size: 42,
            hash: "sha256:abcdef012345".to_string(),
            previous: None,
            freshness: 100,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "item_fetched");
        assert_eq!(events[0]["deployment_id"], "1234");
        assert!(events[0]["previous"].is_null());
    }

    #[test]
    fn json_sink_outputs_complete_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(SyncEvent::Completed {
            fetched: 3,
            fetch_failed: 0,
            transferred: 3,
            transfer_failed: 0,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "complete");
        assert_eq!(events[0]["status"], "success");
        assert_eq!(events[0]["transferred"], 3);
    }

    #[test]
    fn json_sink_outputs_partial_on_errors() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(SyncEvent::Completed {
            fetched: 3,
            fetch_failed: 0,
            transferred: 2,
            transfer_failed: 1,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["status"], "partial");
    }
}
