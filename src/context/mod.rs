//! Template context serialization
//!
//! The template context is the name→value mapping handed to the templating
//! engine at query-execution time, persisted as pretty-printed JSON. Values
//! pass through unchanged (null stays null) except multi-select dropdown
//! selections, which are flattened into one delimited string. No escaping
//! beyond the configured prefix/suffix is performed; making the result safe
//! for the interpolation it feeds is the caller's concern.

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::Result;
use crate::param::{MultiValuesOptions, ParamType, ParamValue, Parameter};
use crate::scan;

/// Sentinel persisted in place of a missing template context
pub const NULL_SENTINEL: &str = "None";

/// Flatten a multi-select selection into one string, wrapping each element
/// with the configured prefix/suffix and joining with the separator
pub fn format_multi_values(values: &[String], opts: &MultiValuesOptions) -> String {
    values
        .iter()
        .map(|v| format!("{}{}{}", opts.prefix, v, opts.suffix))
        .collect::<Vec<_>>()
        .join(&opts.separator)
}

/// Build the name→value mapping in parameter-list order
pub fn build_context(params: &[Parameter]) -> Map<String, Value> {
    let mut context = Map::new();
    for param in params {
        let value = match (&param.value, &param.multi_values_options) {
            (ParamValue::Many(values), Some(opts))
                if param.param_type == ParamType::Dropdown && !values.is_empty() =>
            {
                Value::String(format_multi_values(values, opts))
            }
            (value, _) => value.to_json(),
        };
        context.insert(param.name.clone(), value);
    }
    context
}

/// Serialize the template context for persistence
pub fn serialize_context(params: &[Parameter]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Value::Object(build_context(
        params,
    )))?)
}

/// Parse a persisted template context payload.
///
/// Fails closed: an empty payload, the `"None"` sentinel, malformed JSON or
/// a non-object document all yield an empty context rather than an error.
pub fn parse_context(payload: &str) -> Map<String, Value> {
    let trimmed = payload.trim();
    if trimmed.is_empty() || trimmed == NULL_SENTINEL {
        return Map::new();
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!("persisted template context is not a JSON object, treating as empty");
            Map::new()
        }
        Err(err) => {
            warn!(%err, "malformed persisted template context, treating as empty");
            Map::new()
        }
    }
}

/// Seed a parameter list from SQL text and a pre-existing template context.
///
/// Used when an editor session carries a template context that predates
/// parameter configuration. Every valid placeholder not already in `current`
/// becomes a parameter whose type is inferred from the persisted value:
/// a number becomes a number parameter; a comma-delimited string becomes a
/// multi-select dropdown (quoted with `'` when the string contains quotes),
/// its entries doubling as options and selection; any other string becomes
/// text. Placeholders without a persisted value get scanner defaults.
pub fn seed_parameters(sql: &str, payload: &str, current: &[Parameter]) -> Vec<Parameter> {
    let context = parse_context(payload);
    let report = scan::scan(sql);

    let mut params = current.to_vec();
    for name in &report.valid {
        if params.iter().any(|p| &p.name == name) {
            continue;
        }
        let mut param = Parameter::text(name.clone());
        match context.get(name) {
            Some(Value::Number(n)) => {
                param.param_type = ParamType::Number;
                param.value = n
                    .as_f64()
                    .map(ParamValue::Number)
                    .unwrap_or(ParamValue::Null);
            }
            Some(Value::String(s)) if s.contains(',') => {
                param.param_type = ParamType::Dropdown;
                let quote = if s.contains('\'') { "'" } else { "" };
                param.multi_values_options = Some(MultiValuesOptions::quoted(quote));
                let cleaned: Vec<String> =
                    s.replace('\'', "").split(',').map(str::to_string).collect();
                param.options = cleaned.join("\n");
                param.value = ParamValue::Many(cleaned);
            }
            Some(Value::String(s)) => {
                param.value = ParamValue::Text(s.clone());
            }
            _ => {}
        }
        params.push(param);
    }
    params
}
