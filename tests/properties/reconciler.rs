//! Property tests for the reconciler.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use deployment_sync::{DeploymentSummary, Ledger, Reconciler};

fn deployment_id() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[0-9A-Za-z]{1,8}").unwrap()
}

/// Mostly a handful of short ids, so repeats with differing freshness are common
fn catalog_id() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => proptest::string::string_regex("[A-D]").unwrap(),
        1 => deployment_id(),
    ]
}

fn catalog() -> impl Strategy<Value = Vec<DeploymentSummary>> {
    proptest::collection::vec((catalog_id(), -4i64..4), 0..32).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(id, freshness)| DeploymentSummary::new(id, freshness))
            .collect()
    })
}

fn ledger() -> impl Strategy<Value = Ledger> {
    proptest::collection::btree_map(catalog_id(), -4i64..4, 0..32)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: once every planned fetch is recorded, the same catalog plans nothing.
    #[test]
    fn property_reconciliation_is_idempotent(catalog in catalog(), ledger in ledger()) {
        let plan = Reconciler::plan(&catalog, &ledger);
        let updated = ledger.merged(
            plan.fetches.iter().map(|f| (f.deployment_id.clone(), f.freshness)),
        );

        let again = Reconciler::plan(&catalog, &updated);

        prop_assert!(again.is_empty(), "second plan not empty: {:?}", again.ids());
    }

    /// PROPERTY: an id is planned iff its highest catalog freshness is unknown or
    /// strictly fresher than recorded, and it is planned at that freshness.
    #[test]
    fn property_planned_iff_new_or_strictly_fresher(catalog in catalog(), ledger in ledger()) {
        let plan = Reconciler::plan(&catalog, &ledger);
        let planned: HashMap<&str, i64> = plan
            .fetches
            .iter()
            .map(|f| (f.deployment_id.as_str(), f.freshness))
            .collect();

        let mut highest: HashMap<&str, i64> = HashMap::new();
        for entry in &catalog {
            let slot = highest.entry(entry.id.as_str()).or_insert(entry.freshness);
            *slot = (*slot).max(entry.freshness);
        }

        for (id, freshness) in highest {
            let expected = match ledger.get(id) {
                None => true,
                Some(recorded) => freshness > recorded,
            };
            prop_assert_eq!(planned.contains_key(id), expected, "id {}", id);
            if expected {
                prop_assert_eq!(planned[id], freshness, "id {}", id);
            }
        }
    }

    /// PROPERTY: every catalog entry is either planned or counted as up to date.
    #[test]
    fn property_plan_accounts_for_every_entry(catalog in catalog(), ledger in ledger()) {
        let plan = Reconciler::plan(&catalog, &ledger);

        prop_assert_eq!(plan.len() + plan.up_to_date, catalog.len());
        let unique: HashSet<String> = plan.ids().into_iter().collect();
        prop_assert_eq!(unique.len(), plan.len());
    }

    /// PROPERTY: equal freshness is up to date, one more is planned.
    #[test]
    fn property_freshness_boundary(id in deployment_id(), freshness in (i64::MIN..i64::MAX)) {
        let mut ledger = Ledger::new();
        ledger.set(id.clone(), freshness);

        let same = Reconciler::plan(&[DeploymentSummary::new(id.clone(), freshness)], &ledger);
        let newer = Reconciler::plan(&[DeploymentSummary::new(id.clone(), freshness + 1)], &ledger);

        prop_assert!(same.is_empty());
        prop_assert_eq!(newer.ids(), vec![id]);
    }
}
