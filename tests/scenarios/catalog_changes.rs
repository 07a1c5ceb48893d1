//! Scenario: Catalog Changes Between Runs
//!
//! Journey: deployments get updated and added upstream; once the API is
//! briefly unreachable.

use deployment_sync::{SyncError, SyncOptions};
use serde_json::json;

use crate::common::*;

#[test]
fn scenario_only_new_and_strictly_newer_are_fetched() {
    let ws = Workspace::new();
    let source = ScriptedSource::with_catalog(&[("A", 1), ("B", 1)]);
    let sink = FlakySink::new();
    ws.use_case(&source, &sink)
        .run(&SyncOptions::new())
        .unwrap();

    source.publish(&[("A", 2), ("B", 1), ("C", 0)]);
    let plan = ws.use_case(&source, &sink).preview().unwrap();
    assert_eq!(plan.ids(), vec!["A".to_string(), "C".to_string()]);

    let summary = ws
        .use_case(&source, &sink)
        .run(&SyncOptions::new())
        .unwrap();

    assert_eq!(summary.fetched, vec!["A".to_string(), "C".to_string()]);
    assert_eq!(source.fetch_count("B"), 1);
    assert_eq!(
        ws.ledger_json(),
        json!({
            "A": { "last_update_date": 2 },
            "B": { "last_update_date": 1 },
            "C": { "last_update_date": 0 },
        })
    );
}

#[test]
fn scenario_api_outage_leaves_state_untouched() {
    let ws = Workspace::new();
    let source = ScriptedSource::with_catalog(&[("A", 5)]);
    let sink = FlakySink::new();
    ws.use_case(&source, &sink)
        .run(&SyncOptions::new())
        .unwrap();
    let before = std::fs::read_to_string(ws.ledger_path()).unwrap();

    source.publish(&[("A", 6)]);
    source.set_down(true);
    let err = ws
        .use_case(&source, &sink)
        .run(&SyncOptions::new())
        .unwrap_err();

    assert!(matches!(err, SyncError::SourceUnavailable { .. }));
    assert_eq!(std::fs::read_to_string(ws.ledger_path()).unwrap(), before);
    assert_eq!(sink.attempts(), 1);
}
