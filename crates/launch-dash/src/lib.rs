//! `launch-dash` - interactive launch records dashboard.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Reactive callback table and chart transformations.
pub mod callbacks;
/// Chart specifications.
pub mod chart;
/// Dashboard configuration.
pub mod config;
/// Shared application context.
pub mod context;
/// Control value parsing.
pub mod controls;
/// Launch dataset loading.
pub mod dataset;
/// Dashboard errors.
pub mod error;
/// Page layout declaration.
pub mod layout;
/// Diagnostic tabulations.
pub mod summary;
/// Embedded web server.
pub mod web;

pub use chart::{ChartKind, ChartSpec};
pub use context::DashContext;
pub use dataset::{LaunchRecord, LaunchSite, LaunchTable, Outcome};
pub use error::DashError;
