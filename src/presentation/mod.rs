//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `cli` - Command-line definition
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Text and JSON rendering
//!
//! ## Usage
//!
//! ```ignore
//! use deployment_sync::presentation::factory;
//!
//! let use_case = factory::create_sync_use_case(&config)?;
//! let summary = use_case.run(&factory::sync_options(&config))?;
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, Commands};
pub use factory::create_sync_use_case;
pub use output::TextRenderer;
