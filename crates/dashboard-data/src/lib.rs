//! Data layer for the bike sharing dashboard.
//!
//! Loads and normalizes the daily and hourly CSV datasets and derives the
//! summary tables consumed by the view registry.

pub mod aggregator;
pub mod reader;

pub use dashboard_core as core;
