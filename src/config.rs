//! Limit configuration
//!
//! Two limits are recognized, both overridable from the environment:
//! `QUERY_PARAM_LIMIT` caps the number of parameters per query and
//! `QUERY_PARAM_OPTION_LIMIT` caps dropdown option entries per parameter.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default maximum number of parameters per query
pub const QUERY_PARAM_LIMIT: usize = 10;
/// Default maximum number of dropdown options per parameter
pub const QUERY_PARAM_OPTION_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default = "default_max_parameters")]
    pub max_parameters: usize,
    #[serde(default = "default_max_dropdown_options")]
    pub max_dropdown_options: usize,
}

fn default_max_parameters() -> usize {
    QUERY_PARAM_LIMIT
}

fn default_max_dropdown_options() -> usize {
    QUERY_PARAM_OPTION_LIMIT
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_parameters: QUERY_PARAM_LIMIT,
            max_dropdown_options: QUERY_PARAM_OPTION_LIMIT,
        }
    }
}

impl Limits {
    /// Read limits from the environment, keeping defaults for unset or
    /// unparsable values
    pub fn from_env() -> Self {
        let mut limits = Self::default();
        if let Some(value) = parse_env("QUERY_PARAM_LIMIT") {
            limits.max_parameters = value;
        }
        if let Some(value) = parse_env("QUERY_PARAM_OPTION_LIMIT") {
            limits.max_dropdown_options = value;
        }
        limits
    }
}

fn parse_env(key: &str) -> Option<usize> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, %raw, "ignoring unparsable limit override");
            None
        }
    }
}
