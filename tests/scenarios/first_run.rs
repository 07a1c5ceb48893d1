//! Scenario: First Run Against a Fresh State Directory
//!
//! Journey: an operator points the tool at an empty directory.
//!
//! Steps:
//! 1. The catalog lists deployment X with freshness 100
//! 2. First run downloads X, records it, uploads it, removes the local copy
//! 3. Second run with an unchanged catalog does nothing

use deployment_sync::application::LedgerWrite;
use deployment_sync::SyncOptions;
use serde_json::json;

use crate::common::*;

#[test]
fn scenario_first_run_then_idle_run() {
    let ws = Workspace::new();
    let source = ScriptedSource::with_catalog(&[("X", 100)]);
    let sink = FlakySink::new();

    let summary = ws
        .use_case(&source, &sink)
        .run(&SyncOptions::new())
        .unwrap();

    assert_eq!(summary.fetched, vec!["X".to_string()]);
    assert_eq!(summary.transferred(), 1);
    assert!(summary.is_clean());
    assert_eq!(ws.ledger_json(), json!({ "X": { "last_update_date": 100 } }));
    assert_eq!(
        sink.stored().get(&remote("X")),
        Some(&ScriptedSource::payload("X"))
    );
    assert!(!ws.staged_file("X").exists());

    let second = ws
        .use_case(&source, &sink)
        .run(&SyncOptions::new())
        .unwrap();

    assert!(second.fetched.is_empty());
    assert_eq!(second.skipped, 1);
    assert_eq!(second.ledger_write, LedgerWrite::Unchanged);
    assert!(second.outcomes.is_empty());
    assert_eq!(source.fetch_count("X"), 1);
    assert_eq!(sink.attempts(), 1);
}

#[test]
fn scenario_empty_catalog_bootstraps_ledger() {
    let ws = Workspace::new();
    let source = ScriptedSource::with_catalog(&[]);
    let sink = FlakySink::new();

    let summary = ws
        .use_case(&source, &sink)
        .run(&SyncOptions::new())
        .unwrap();

    assert_eq!(summary.listed, 0);
    assert!(!summary.has_changes());
    assert_eq!(ws.ledger_json(), json!({}));
}
