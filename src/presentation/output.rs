//! Output Rendering
//!
//! Human-readable text for run summaries, plans and the ledger, plus the
//! JSON documents printed by `plan --json` and `ledger --json`. Run
//! progress in JSON mode is streamed by `JsonEventSink` instead.

use std::fmt::Write as _;

use serde_json::{json, Value};

use crate::application::{LedgerWrite, RunSummary};
use crate::domain::entities::Ledger;
use crate::domain::services::{FetchPlan, FetchReason};

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    write: &'static str,
    warn: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            write: "→",
            warn: "!",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            write: "->",
            warn: "[WARN]",
        }
    }
}

/// Text renderer for CLI output
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    /// Whether to use unicode icons
    pub unicode: bool,
    /// Verbosity level (number of `-v` flags)
    pub verbose: u8,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            unicode: true,
            verbose: 0,
        }
    }
}

impl TextRenderer {
    fn icons(&self) -> Icons {
        if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        }
    }

    /// Render the summary of a finished run
    pub fn render_summary(&self, summary: &RunSummary) -> String {
        let icons = self.icons();
        let mut out = String::new();

        if summary.is_clean() && !summary.has_changes() && summary.carried_over.is_empty() {
            let _ = writeln!(out, "{} Already Up-to-date", icons.check);
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "  {} deployments listed, {} up to date",
                summary.listed, summary.skipped
            );
            return out;
        }

        if summary.is_clean() {
            let _ = writeln!(out, "{} Sync Complete", icons.check);
        } else {
            let _ = writeln!(out, "{} Sync Finished With Errors", icons.cross);
        }
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  {} listed, {} up to date, {} fetched, {} uploaded",
            summary.listed,
            summary.skipped,
            summary.fetched.len(),
            summary.transferred()
        );

        if summary.ledger_degraded {
            let _ = writeln!(
                out,
                "  {} ledger could not be read; every deployment was treated as new",
                icons.warn
            );
        }
        if let LedgerWrite::Failed { error } = &summary.ledger_write {
            let _ = writeln!(out, "  {} ledger not saved: {}", icons.warn, error);
        }

        if !summary.fetched.is_empty() && self.verbose > 0 {
            let _ = writeln!(out);
            let _ = writeln!(out, "  Fetched ({}):", summary.fetched.len());
            for id in &summary.fetched {
                let _ = writeln!(out, "    {} {}", icons.write, id);
            }
        }

        if !summary.carried_over.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "  Carried over from earlier runs ({}):",
                summary.carried_over.len()
            );
            for id in &summary.carried_over {
                let _ = writeln!(out, "    {} {}", icons.write, id);
            }
        }

        if !summary.fetch_failures.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "  Download failed ({}):", summary.fetch_failures.len());
            for failure in &summary.fetch_failures {
                let _ = writeln!(
                    out,
                    "    {} {}: {}",
                    icons.cross, failure.deployment_id, failure.error
                );
            }
        }

        let failed: Vec<_> = summary.outcomes.iter().filter(|o| !o.succeeded).collect();
        if !failed.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "  Upload failed ({}):", failed.len());
            for outcome in failed {
                let reason = outcome
                    .failure
                    .as_ref()
                    .map(|f| f.to_string())
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "    {} {} after {} attempt(s): {}",
                    icons.cross, outcome.deployment_id, outcome.attempts, reason
                );
            }
            let _ = writeln!(out, "  Staged copies are kept and retried next run.");
        }

        out
    }

    /// Render what the next run would download
    pub fn render_plan(&self, plan: &FetchPlan) -> String {
        let icons = self.icons();
        let mut out = String::new();

        if plan.is_empty() {
            let _ = writeln!(out, "{} Nothing to fetch", icons.check);
            let _ = writeln!(out, "  {} deployments up to date", plan.up_to_date);
            return out;
        }

        let _ = writeln!(
            out,
            "{} deployments to fetch ({} new, {} updated), {} up to date",
            plan.len(),
            plan.new_count(),
            plan.len() - plan.new_count(),
            plan.up_to_date
        );
        for planned in &plan.fetches {
            match planned.reason {
                FetchReason::New => {
                    let _ = writeln!(
                        out,
                        "  {} {} (new, {})",
                        icons.write, planned.deployment_id, planned.freshness
                    );
                }
                FetchReason::Updated { previous } => {
                    let _ = writeln!(
                        out,
                        "  {} {} ({} -> {})",
                        icons.write, planned.deployment_id, previous, planned.freshness
                    );
                }
            }
        }
        out
    }

    /// Render the ledger as an aligned two-column table
    pub fn render_ledger(&self, ledger: &Ledger) -> String {
        let mut out = String::new();
        if ledger.is_empty() {
            let _ = writeln!(out, "Ledger is empty");
            return out;
        }

        let width = ledger
            .entries()
            .map(|(id, _)| id.len())
            .max()
            .unwrap_or(0)
            .max("DEPLOYMENT".len());
        let _ = writeln!(out, "{:<width$}  LAST UPDATE", "DEPLOYMENT", width = width);
        for (id, freshness) in ledger.entries() {
            let _ = writeln!(out, "{:<width$}  {}", id, freshness, width = width);
        }
        out
    }
}

/// JSON document for `plan --json`
pub fn plan_json(plan: &FetchPlan) -> Value {
    let fetches: Vec<Value> = plan
        .fetches
        .iter()
        .map(|planned| {
            json!({
                "id": planned.deployment_id,
                "last_update_date": planned.freshness,
                "previous": planned.previous(),
                "reason": match planned.reason {
                    FetchReason::New => "new",
                    FetchReason::Updated { .. } => "updated",
                },
            })
        })
        .collect();

    json!({
        "type": "plan",
        "to_fetch": fetches,
        "up_to_date": plan.up_to_date,
    })
}

/// JSON document for `ledger --json`, in the on-disk shape
pub fn ledger_json(ledger: &Ledger) -> Value {
    let entries: serde_json::Map<String, Value> = ledger
        .entries()
        .map(|(id, freshness)| (id.to_string(), json!({ "last_update_date": freshness })))
        .collect();
    Value::Object(entries)
}
