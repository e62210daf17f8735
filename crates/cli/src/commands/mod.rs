//! Command handlers for the Lexis CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod index;
pub mod search;
pub mod source;
pub mod stats;

// Re-export command types for convenience
pub use index::IndexCommand;
pub use search::SearchCommand;
pub use stats::StatsCommand;
