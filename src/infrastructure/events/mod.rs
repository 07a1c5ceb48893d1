//! Event Sink Implementations
//!
//! Provides concrete implementations of SyncEventSink:
//! - TracingEventSink: structured log records (default)
//! - JsonEventSink: NDJSON output for automation

mod json;
mod logging;

pub use json::JsonEventSink;
pub use logging::TracingEventSink;
