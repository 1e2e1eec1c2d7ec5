//! paramsync - placeholder scanning and parameter synchronization for SQL query templates
//!
//! This library keeps a list of typed parameters in step with the
//! `{{ name }}` placeholders found in SQL text, and renders the list into
//! the template context consumed when the query runs.

pub mod cli;
pub mod config;
pub mod context;
pub mod editor;
pub mod error;
pub mod param;
pub mod scan;
pub mod sync;

pub use config::Limits;
pub use error::{Error, Result};
pub use param::{MultiValuesOptions, ParamType, ParamValue, Parameter};
pub use scan::{Placeholder, ScanReport};
pub use sync::SyncOutcome;

/// Scan SQL text for placeholder tokens
pub fn scan(sql: &str) -> ScanReport {
    scan::scan(sql)
}

/// Reconcile a parameter list against the placeholders in SQL text
pub fn sync(sql: &str, params: &[Parameter], limits: &Limits) -> SyncOutcome {
    sync::reconcile(params, &scan::scan(sql), limits)
}

/// Render the template-context payload for a parameter list
pub fn render_context(params: &[Parameter]) -> Result<String> {
    context::serialize_context(params)
}
