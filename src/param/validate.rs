//! Editor validation contract
//!
//! These checks back the parameter editor form. They run in the same order
//! as the form rules: required, minimum length, maximum length, name
//! grammar, uniqueness. Each failure maps to its own error so callers can
//! report it inline against the offending field.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::config::Limits;
use crate::error::{Error, Result};

use super::{ParamType, ParamValue, Parameter, DATETIME_FORMAT, DATE_FORMAT};

/// Structural name rule: leading letter, then letters, digits or underscores
static NAME_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap());

/// Validate a new parameter name against the grammar and the existing set
pub fn validate_name(name: &str, existing: &[&str]) -> Result<()> {
    if name.is_empty() {
        return Err(Error::NameRequired);
    }
    if name.chars().count() < 3 {
        return Err(Error::NameTooShort { name: name.to_string() });
    }
    if name.chars().count() > 50 {
        return Err(Error::NameTooLong { name: name.to_string() });
    }
    if !NAME_CHARSET.is_match(name) || name.ends_with('_') {
        return Err(Error::NameSyntax { name: name.to_string() });
    }
    if existing.contains(&name) {
        return Err(Error::DuplicateName { name: name.to_string() });
    }
    Ok(())
}

/// Enforce the dropdown option count limit on a newline-delimited list
pub fn validate_options(options: &str, limits: &Limits) -> Result<()> {
    let count = options.split('\n').count();
    if count > limits.max_dropdown_options {
        return Err(Error::OptionLimitExceeded {
            limit: limits.max_dropdown_options,
        });
    }
    Ok(())
}

/// Check that a value has the right shape for a parameter's type.
///
/// Null is always accepted. Dates and datetimes are stored as preformatted
/// strings and must parse under the editor formats. Dropdown values must be
/// drawn from the options list; array values are only accepted when
/// multi-select is enabled.
pub fn validate_value(param: &Parameter, value: &ParamValue) -> Result<()> {
    let mismatch = |message: &str| Error::InvalidValue {
        name: param.name.clone(),
        message: message.to_string(),
    };

    match (param.param_type, value) {
        (_, ParamValue::Null) => Ok(()),
        (ParamType::Text, ParamValue::Text(_)) => Ok(()),
        (ParamType::Number, ParamValue::Number(_)) => Ok(()),
        (ParamType::Date, ParamValue::Text(s)) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(|_| ())
            .map_err(|_| mismatch("expected a YYYY-MM-DD date")),
        (ParamType::DateTime, ParamValue::Text(s)) => {
            NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
                .map(|_| ())
                .map_err(|_| mismatch("expected a YYYY-MM-DD HH:MM:SS datetime"))
        }
        (ParamType::Dropdown, ParamValue::Text(s)) => {
            if param.is_multi_select() {
                return Err(mismatch("multi-select dropdown expects a list of options"));
            }
            if param.options_list().iter().any(|o| o == s) {
                Ok(())
            } else {
                Err(mismatch("value is not one of the configured options"))
            }
        }
        (ParamType::Dropdown, ParamValue::Many(vs)) => {
            if !param.is_multi_select() {
                return Err(mismatch("single-select dropdown expects one option"));
            }
            let options = param.options_list();
            if vs.iter().all(|v| options.contains(v)) {
                Ok(())
            } else {
                Err(mismatch("selection contains values outside the configured options"))
            }
        }
        _ => Err(mismatch("value does not match the parameter type")),
    }
}
