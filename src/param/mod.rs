//! Parameter data model
//!
//! A parameter is the structured configuration (type, value, options) bound
//! to a placeholder name. Parameter lists are persisted as a JSON array of
//! records; field names in the serialized form (`type`,
//! `multiValuesOptions`) follow the persisted editor state.

pub mod remap;
pub mod validate;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Format produced by date inputs
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Format produced by datetime inputs
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Input type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[default]
    Text,
    Number,
    Date,
    DateTime,
    Dropdown,
}

/// A bound parameter value
///
/// Non-dropdown types carry a scalar; a multi-select dropdown carries a
/// sequence of selected options. Serialized untagged, so the persisted form
/// is plain JSON: null, number, string or array of strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    #[default]
    Null,
    Number(f64),
    Text(String),
    Many(Vec<String>),
}

impl ParamValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Plain JSON rendition of the value (non-finite numbers become null)
    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Null => Value::Null,
            ParamValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ParamValue::Text(s) => Value::String(s.clone()),
            ParamValue::Many(vs) => Value::Array(vs.iter().cloned().map(Value::String).collect()),
        }
    }
}

/// Wrapping configuration for multi-select dropdown values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiValuesOptions {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    ",".to_string()
}

impl Default for MultiValuesOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            separator: default_separator(),
        }
    }
}

impl MultiValuesOptions {
    /// Options wrapping every element in the given quote on both sides
    pub fn quoted(quote: impl Into<String>) -> Self {
        let quote = quote.into();
        Self {
            prefix: quote.clone(),
            suffix: quote,
            separator: default_separator(),
        }
    }
}

/// A named, typed placeholder binding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    #[serde(default)]
    pub value: ParamValue,
    /// Newline-delimited candidate values, dropdown type only
    #[serde(default)]
    pub options: String,
    /// Present only when dropdown multi-select is enabled
    #[serde(rename = "multiValuesOptions", default)]
    pub multi_values_options: Option<MultiValuesOptions>,
}

impl Parameter {
    /// New parameter with scanner defaults: type text, no value
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: ParamType::Text,
            value: ParamValue::Null,
            options: String::new(),
            multi_values_options: None,
        }
    }

    /// Whether multi-select is enabled for this parameter
    pub fn is_multi_select(&self) -> bool {
        self.multi_values_options.is_some()
    }

    /// Options split on newlines, duplicates included
    pub fn options_list(&self) -> Vec<String> {
        self.options.split('\n').map(str::to_string).collect()
    }
}

/// Drop duplicate option lines, preserving first-seen order
pub fn dedup_options(options: &str) -> String {
    let mut seen = std::collections::HashSet::new();
    options
        .split('\n')
        .filter(|line| seen.insert(line.to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a persisted parameter list (JSON array of records)
pub fn parse_params(payload: &str) -> Result<Vec<Parameter>> {
    serde_json::from_str(payload).map_err(|e| Error::StateError {
        message: format!("malformed parameter list: {}", e),
    })
}

/// Serialize a parameter list for persistence
pub fn serialize_params(params: &[Parameter]) -> Result<String> {
    Ok(serde_json::to_string(params)?)
}
