//! Scenario: File Store Outage
//!
//! Journey: the WebDAV store is down during a run and back for the next.
//!
//! Steps:
//! 1. Run with the store down: downloads succeed, uploads exhaust their rounds
//! 2. The ledger still advances and the staged copies stay on disk
//! 3. Next run with the store up: nothing is re-downloaded, the leftovers
//!    are uploaded and removed

use deployment_sync::SyncOptions;

use crate::common::*;

#[test]
fn scenario_outage_then_recovery_uploads_leftovers_without_refetch() {
    let ws = Workspace::new();
    let source = ScriptedSource::with_catalog(&[("A", 10), ("B", 20)]);
    let sink = FlakySink::new();
    sink.set_down(true);

    let options = SyncOptions::new().with_max_rounds(2);
    let first = ws.use_case(&source, &sink).run(&options).unwrap();

    assert_eq!(first.fetched.len(), 2);
    assert_eq!(first.transfer_failed(), 2);
    assert!(first.outcomes.iter().all(|o| o.attempts == 2));
    assert_eq!(sink.attempts(), 4);
    assert_eq!(ws.ledger_json()["A"]["last_update_date"], 10);
    assert!(ws.staged_file("A").exists());
    assert!(ws.staged_file("B").exists());

    sink.set_down(false);
    let second = ws.use_case(&source, &sink).run(&options).unwrap();

    assert!(second.fetched.is_empty());
    assert_eq!(second.carried_over, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(second.transferred(), 2);
    assert_eq!(source.fetch_count("A"), 1);
    assert_eq!(source.fetch_count("B"), 1);
    assert!(sink.stored().contains_key(&remote("A")));
    assert!(sink.stored().contains_key(&remote("B")));
    assert!(!ws.staged_file("A").exists());
    assert!(!ws.staged_file("B").exists());
}

#[test]
fn scenario_flaky_item_succeeds_in_a_later_round() {
    let ws = Workspace::new();
    let source = ScriptedSource::with_catalog(&[("A", 1), ("B", 1), ("C", 1)]);
    let sink = FlakySink::new();
    sink.fail_times(&remote("B"), 1);

    let summary = ws
        .use_case(&source, &sink)
        .run(&SyncOptions::new().with_max_rounds(3))
        .unwrap();

    assert_eq!(summary.transferred(), 3);
    let attempts = |id: &str| {
        summary
            .outcomes
            .iter()
            .find(|o| o.deployment_id == id)
            .map(|o| o.attempts)
    };
    assert_eq!(attempts("A"), Some(1));
    assert_eq!(attempts("B"), Some(2));
    assert_eq!(attempts("C"), Some(1));
    assert_eq!(sink.attempts(), 4);
}
