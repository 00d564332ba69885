//! Runtime layer for the bike sharing dashboard.
//!
//! Owns the loaded dataset, the menu registry and the per-view content the
//! UI renders.

pub mod data_manager;
pub mod narratives;
pub mod views;

pub use dashboard_core as core;
pub use dashboard_data as data;
