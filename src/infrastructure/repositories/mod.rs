//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod ledger;
mod name_mapping;

pub use ledger::{parse_ledger, render_ledger, JsonLedgerRepository};
pub use name_mapping::{load_friendly_names, parse_name_mapping};
