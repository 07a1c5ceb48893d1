//! Scenario tests for deployment-sync.
//!
//! Scenarios drive consecutive sync runs over one state directory, the way
//! a cron job would, with in-memory stand-ins for the remote services.
//!
//! Run with: cargo test --test scenarios

mod common;

#[path = "scenarios/first_run.rs"]
mod first_run;

#[path = "scenarios/sink_outage.rs"]
mod sink_outage;

#[path = "scenarios/catalog_changes.rs"]
mod catalog_changes;
