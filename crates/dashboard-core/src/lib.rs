//! Shared domain types for the bike sharing dashboard.
//!
//! Holds the normalized record types, the categorical label tables, the
//! correlation statistic, number formatting and the CLI/persisted settings
//! used by every other crate in the workspace.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod statistics;
