//! Dropdown value remapping
//!
//! When a dropdown parameter is edited, its stored value may no longer fit:
//! options change, or single/multi selection is toggled. The remap keeps as
//! much of the previous selection as the new configuration allows, falling
//! back to the first available option (or null) otherwise.

use super::{ParamValue, Parameter};

/// Compute the next value for a dropdown parameter being saved.
///
/// `draft` is the edited parameter, `current` the one being replaced, and
/// `options` the draft's deduplicated options list.
pub fn remap_dropdown_value(draft: &Parameter, current: &Parameter, options: &[String]) -> ParamValue {
    let multi_new = draft.is_multi_select();
    let multi_prev = current.is_multi_select();

    if multi_prev && !multi_new {
        first_option(options)
    } else if multi_prev && multi_new {
        match &current.value {
            ParamValue::Many(values) => {
                let kept: Vec<String> = values
                    .iter()
                    .filter(|v| options.contains(v))
                    .cloned()
                    .collect();
                if kept.is_empty() {
                    ParamValue::Null
                } else {
                    ParamValue::Many(kept)
                }
            }
            other => other.clone(),
        }
    } else if !multi_new && !multi_prev {
        match &current.value {
            ParamValue::Text(s) if options.contains(s) => current.value.clone(),
            _ => first_option(options),
        }
    } else {
        // single -> multi: wrap the previous value, if any
        match &current.value {
            ParamValue::Text(s) if !s.is_empty() => ParamValue::Many(vec![s.clone()]),
            ParamValue::Number(n) if *n != 0.0 => ParamValue::Many(vec![n.to_string()]),
            _ => ParamValue::Null,
        }
    }
}

fn first_option(options: &[String]) -> ParamValue {
    options
        .first()
        .map(|o| ParamValue::Text(o.clone()))
        .unwrap_or(ParamValue::Null)
}
