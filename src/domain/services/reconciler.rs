//! Reconciliation service
//!
//! Pure domain logic deciding which catalog entries need a download,
//! based on the freshness markers recorded in the ledger. No I/O, no errors.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::domain::entities::{DeploymentSummary, Ledger};

/// Why a deployment is planned for download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchReason {
    /// Never downloaded before
    New,
    /// Catalog freshness is strictly newer than the recorded one
    Updated { previous: i64 },
}

/// A planned download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFetch {
    pub deployment_id: String,
    /// Catalog freshness; becomes the ledger value once staged
    pub freshness: i64,
    pub reason: FetchReason,
}

impl PlannedFetch {
    /// Freshness recorded before this run, if any
    pub fn previous(&self) -> Option<i64> {
        match self.reason {
            FetchReason::New => None,
            FetchReason::Updated { previous } => Some(previous),
        }
    }
}

/// Result of reconciling a catalog against the ledger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPlan {
    /// Downloads in catalog order
    pub fetches: Vec<PlannedFetch>,
    /// Catalog entries that are already up to date (including duplicates)
    pub up_to_date: usize,
}

impl FetchPlan {
    /// Planned ids in catalog order
    pub fn ids(&self) -> Vec<String> {
        self.fetches
            .iter()
            .map(|f| f.deployment_id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fetches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fetches.is_empty()
    }

    pub fn new_count(&self) -> usize {
        self.fetches
            .iter()
            .filter(|f| f.reason == FetchReason::New)
            .count()
    }
}

/// Reconciler - compares a listed catalog with the ledger
pub struct Reconciler;

impl Reconciler {
    /// Plan the downloads for one run.
    ///
    /// An entry is planned when its id is absent from the ledger, or when its
    /// freshness is strictly greater than the recorded one. Equal freshness is
    /// up to date. A repeated id is collapsed to its highest freshness and
    /// planned at most once, at the position of its first occurrence; the
    /// extra occurrences count as up to date.
    pub fn plan(catalog: &[DeploymentSummary], ledger: &Ledger) -> FetchPlan {
        let mut plan = FetchPlan::default();
        let mut order: Vec<&str> = Vec::new();
        let mut freshest: HashMap<&str, i64> = HashMap::new();

        for entry in catalog {
            match freshest.entry(entry.id.as_str()) {
                Entry::Vacant(slot) => {
                    order.push(entry.id.as_str());
                    slot.insert(entry.freshness);
                }
                Entry::Occupied(mut slot) => {
                    plan.up_to_date += 1;
                    if entry.freshness > *slot.get() {
                        slot.insert(entry.freshness);
                    }
                }
            }
        }

        for id in order {
            let Some(&freshness) = freshest.get(id) else {
                continue;
            };

            let reason = match ledger.get(id) {
                None => FetchReason::New,
                Some(previous) if freshness > previous => FetchReason::Updated { previous },
                Some(_) => {
                    plan.up_to_date += 1;
                    continue;
                }
            };

            plan.fetches.push(PlannedFetch {
                deployment_id: id.to_string(),
                freshness,
                reason,
            });
        }

        plan
    }
}

/// Ids needing download, in catalog order
pub fn plan(catalog: &[DeploymentSummary], ledger: &Ledger) -> Vec<String> {
    Reconciler::plan(catalog, ledger).ids()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(entries: &[(&str, i64)]) -> Vec<DeploymentSummary> {
        entries
            .iter()
            .map(|(id, f)| DeploymentSummary::new(*id, *f))
            .collect()
    }

    #[test]
    fn absent_id_is_new() {
        let plan = Reconciler::plan(&catalog(&[("X", 100)]), &Ledger::new());
        assert_eq!(plan.ids(), vec!["X"]);
        assert_eq!(plan.fetches[0].reason, FetchReason::New);
        assert_eq!(plan.new_count(), 1);
    }

    #[test]
    fn equal_freshness_is_up_to_date() {
        let ledger: Ledger = [("X", 100)].into_iter().collect();
        let plan = Reconciler::plan(&catalog(&[("X", 100)]), &ledger);
        assert!(plan.is_empty());
        assert_eq!(plan.up_to_date, 1);
    }

    #[test]
    fn one_newer_is_updated() {
        let ledger: Ledger = [("X", 100)].into_iter().collect();
        let plan = Reconciler::plan(&catalog(&[("X", 101)]), &ledger);
        assert_eq!(plan.ids(), vec!["X"]);
        assert_eq!(plan.fetches[0].reason, FetchReason::Updated { previous: 100 });
        assert_eq!(plan.fetches[0].previous(), Some(100));
    }

    #[test]
    fn older_freshness_is_skipped() {
        let ledger: Ledger = [("X", 100)].into_iter().collect();
        assert!(plan(&catalog(&[("X", 50)]), &ledger).is_empty());
    }

    #[test]
    fn new_ids_included_regardless_of_freshness() {
        let out = plan(&catalog(&[("zero", 0), ("neg", -5)]), &Ledger::new());
        assert_eq!(out, vec!["zero", "neg"]);
    }

    #[test]
    fn order_follows_catalog() {
        let ledger: Ledger = [("B", 10)].into_iter().collect();
        let out = plan(&catalog(&[("C", 1), ("B", 11), ("A", 1)]), &ledger);
        assert_eq!(out, vec!["C", "B", "A"]);
    }

    #[test]
    fn duplicate_ids_planned_once_at_highest_freshness() {
        let plan = Reconciler::plan(
            &catalog(&[("X", 1), ("Y", 3), ("X", 2)]),
            &Ledger::new(),
        );
        assert_eq!(plan.ids(), vec!["X", "Y"]);
        assert_eq!(plan.fetches[0].freshness, 2);
        assert_eq!(plan.up_to_date, 1);
    }

    #[test]
    fn stale_duplicate_does_not_hide_fresher_one() {
        let ledger: Ledger = [("X", 1)].into_iter().collect();

        let plan = Reconciler::plan(&catalog(&[("X", 1), ("X", 2)]), &ledger);

        assert_eq!(plan.ids(), vec!["X"]);
        assert_eq!(plan.fetches[0].freshness, 2);
        assert_eq!(plan.fetches[0].reason, FetchReason::Updated { previous: 1 });
    }

    #[test]
    fn duplicates_all_stale_are_up_to_date() {
        let ledger: Ledger = [("X", 5)].into_iter().collect();

        let plan = Reconciler::plan(&catalog(&[("X", 4), ("X", 5)]), &ledger);

        assert!(plan.is_empty());
        assert_eq!(plan.up_to_date, 2);
    }

    #[test]
    fn ledger_ids_missing_from_catalog_are_ignored() {
        let ledger: Ledger = [("gone", 5)].into_iter().collect();
        let plan = Reconciler::plan(&catalog(&[]), &ledger);
        assert!(plan.is_empty());
        assert_eq!(plan.up_to_date, 0);
    }
}
