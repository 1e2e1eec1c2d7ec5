//! Parameter store reconciliation
//!
//! Reconciliation updates the parameter list to match the placeholders
//! currently present in the SQL text: newly discovered valid names are
//! appended with scanner defaults, entries whose token no longer appears
//! anywhere are dropped, and surviving entries keep their user-set type,
//! value and options untouched.
//!
//! The outcome is always a fresh list; callers replace their state wholesale
//! so concurrent readers keep a consistent snapshot.

use tracing::debug;

use crate::config::Limits;
use crate::param::Parameter;
use crate::scan::{Placeholder, ScanReport};

/// Result of reconciling a parameter list against scanned SQL text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncOutcome {
    /// The next parameter list
    pub params: Vec<Parameter>,
    /// The valid placeholder count exceeded the configured maximum and the
    /// list was left unchanged
    pub limit_exceeded: bool,
    /// Tokens present in the text that fail the identifier grammar; these
    /// are reported but never materialized as parameters
    pub invalid: Vec<Placeholder>,
}

impl SyncOutcome {
    pub fn has_invalid(&self) -> bool {
        !self.invalid.is_empty()
    }
}

/// Compute the next parameter list from the current one and a scan report
pub fn reconcile(current: &[Parameter], report: &ScanReport, limits: &Limits) -> SyncOutcome {
    if report.valid.len() > limits.max_parameters {
        debug!(
            found = report.valid.len(),
            limit = limits.max_parameters,
            "placeholder count over limit, leaving parameter list unchanged"
        );
        return SyncOutcome {
            params: current.to_vec(),
            limit_exceeded: true,
            invalid: Vec::new(),
        };
    }

    let invalid: Vec<Placeholder> = report.invalid().into_iter().cloned().collect();

    // Keep entries still referenced anywhere in the text, in their existing
    // order, then append newly discovered valid names with defaults.
    let mut params: Vec<Parameter> = current
        .iter()
        .filter(|p| report.contains(&p.name))
        .cloned()
        .collect();
    for name in &report.valid {
        if !current.iter().any(|p| &p.name == name) {
            params.push(Parameter::text(name.clone()));
        }
    }

    debug!(
        before = current.len(),
        after = params.len(),
        invalid = invalid.len(),
        "reconciled parameter list"
    );

    SyncOutcome {
        params,
        limit_exceeded: false,
        invalid,
    }
}
