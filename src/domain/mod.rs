//! Domain Layer
//!
//! The core of deployment-sync: pure reconciliation logic and the port
//! definitions it consumes. Nothing in here touches the network or the disk.
//!
//! ## Structure
//!
//! - `entities/` - Deployments, the freshness ledger, staged artifacts, outcomes
//! - `value_objects/` - Immutable value types (ContentHash)
//! - `services/` - Pure services (Reconciler, RemoteNaming)
//! - `ports/` - Interface definitions implemented by infrastructure

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
