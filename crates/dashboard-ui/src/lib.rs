//! Terminal UI layer for the bike sharing dashboard.
//!
//! Provides themes, the header and sidebar components, table and chart
//! rendering, and the main application event loop built on top of
//! [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod table_view;
pub mod themes;

pub use dashboard_core as core;
