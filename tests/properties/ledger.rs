//! Property tests for ledger persistence.

use proptest::prelude::*;

use deployment_sync::domain::ports::LedgerRepository;
use deployment_sync::infrastructure::repositories::{parse_ledger, render_ledger};
use deployment_sync::infrastructure::JsonLedgerRepository;
use deployment_sync::Ledger;

fn ledger() -> impl Strategy<Value = Ledger> {
    let id = proptest::string::string_regex("[0-9A-Za-z _\"\\\\-]{1,12}").unwrap();
    proptest::collection::btree_map(id, any::<i64>(), 0..24)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a saved ledger loads back unchanged, ids with quotes included.
    #[test]
    fn property_saved_ledger_loads_back(ledger in ledger()) {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonLedgerRepository::new(dir.path().join("deployment_info.json"));

        repo.save(&ledger).unwrap();

        prop_assert_eq!(repo.load().unwrap(), ledger);
    }

    /// PROPERTY: rendering is deterministic, so equal ledgers produce equal files.
    #[test]
    fn property_render_is_stable(ledger in ledger()) {
        let rendered = render_ledger(&ledger);
        let reparsed = parse_ledger(&rendered).unwrap();

        prop_assert_eq!(render_ledger(&reparsed), rendered);
    }

    /// PROPERTY: merging never drops ids and later updates win.
    #[test]
    fn property_merge_keeps_ids(base in ledger(), updates in ledger()) {
        let merged = base.merged(updates.entries().map(|(id, f)| (id.to_string(), f)));

        for (id, freshness) in base.entries() {
            prop_assert!(merged.contains(id));
            if updates.get(id).is_none() {
                prop_assert_eq!(merged.get(id), Some(freshness));
            }
        }
        for (id, freshness) in updates.entries() {
            prop_assert_eq!(merged.get(id), Some(freshness));
        }
    }

    /// PROPERTY: arbitrary text never panics the ledger parser.
    #[test]
    fn property_parse_never_panics(content in ".{0,200}") {
        let _ = parse_ledger(&content);
    }
}
