//! Placeholder scanning for SQL text
//!
//! A placeholder is a `{{ name }}` token embedded in SQL text. Scanning runs
//! two patterns over the text:
//! 1. Permissive: every `{{ ... }}` token, whatever its content
//! 2. Strict: only tokens whose name matches the identifier grammar
//!
//! Both passes are pure and deduplicate names in first-seen order, so a scan
//! can be re-run on every text change without shared state between calls.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Permissive placeholder pattern: double braces around any non-`}` content
static ALL_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([^}]+?)\s*\}\}").unwrap());

/// Strict placeholder pattern: identifier grammar embedded in double braces
static VALID_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z][A-Za-z0-9_]{1,48}[A-Za-z0-9])\s*\}\}").unwrap());

/// Standalone identifier grammar: starts with a letter, 3-50 characters,
/// alphanumeric or underscore, does not end in an underscore
static VALID_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]{1,48}[A-Za-z0-9]$").unwrap());

/// One placeholder token found in SQL text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The trimmed name between the braces
    pub name: String,
    /// Byte span of the first occurrence of the full token
    pub span: (usize, usize),
}

/// Result of scanning SQL text for placeholders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Every placeholder found by the permissive pattern, first-seen order
    pub all: Vec<Placeholder>,
    /// Names matching the strict identifier grammar, first-seen order
    pub valid: Vec<String>,
}

impl ScanReport {
    /// Whether the permissive pass found `name` anywhere in the text
    pub fn contains(&self, name: &str) -> bool {
        self.all.iter().any(|p| p.name == name)
    }

    /// Placeholders whose name fails the strict identifier grammar
    pub fn invalid(&self) -> Vec<&Placeholder> {
        self.all.iter().filter(|p| !is_valid_name(&p.name)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Scan SQL text for placeholder tokens
pub fn scan(sql: &str) -> ScanReport {
    let mut all = Vec::new();
    let mut seen = HashSet::new();
    for caps in ALL_PARAM.captures_iter(sql) {
        let token = caps.get(0).unwrap();
        let name = caps.get(1).unwrap().as_str().trim();
        if seen.insert(name.to_string()) {
            all.push(Placeholder {
                name: name.to_string(),
                span: (token.start(), token.end() - token.start()),
            });
        }
    }

    let mut valid = Vec::new();
    let mut seen_valid = HashSet::new();
    for caps in VALID_PARAM.captures_iter(sql) {
        let name = caps.get(1).unwrap().as_str();
        if seen_valid.insert(name.to_string()) {
            valid.push(name.to_string());
        }
    }

    debug!(all = all.len(), valid = valid.len(), "scanned sql text for placeholders");

    ScanReport { all, valid }
}

/// Check a bare name against the strict identifier grammar
pub fn is_valid_name(name: &str) -> bool {
    VALID_NAME.is_match(name)
}
