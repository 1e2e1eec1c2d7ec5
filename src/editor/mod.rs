//! Editor-session integration
//!
//! Save, value-change and delete flows for the parameter list. The core
//! never touches the SQL text buffer: mutations the flows imply (inserting a
//! new placeholder token at the cursor, stripping a deleted one) are
//! returned as [`EditCommand`] values for the owning editor to apply.
//!
//! Every flow returns a fresh parameter list; callers replace their state
//! wholesale.

use crate::config::Limits;
use crate::error::{Error, Result};
use crate::param::remap::remap_dropdown_value;
use crate::param::{dedup_options, validate, ParamType, ParamValue, Parameter};

/// Zero-based cursor position in the editor buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPos {
    pub row: usize,
    pub column: usize,
}

/// A text-buffer mutation for the owning editor to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Insert `text` at `at`, then move the cursor to `cursor_after`
    InsertToken {
        text: String,
        at: CursorPos,
        cursor_after: CursorPos,
    },
    /// Remove every occurrence of `text` from the buffer. Alternate
    /// spellings of the token (different inner whitespace) are cleaned up by
    /// reconciliation on the next text change.
    RemoveToken { text: String },
}

/// Result of a save or delete operation on the parameter list
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    pub params: Vec<Parameter>,
    pub command: Option<EditCommand>,
}

/// Render the placeholder token for a parameter name
pub fn placeholder_token(name: &str) -> String {
    format!("{{{{ {} }}}}", name)
}

/// Save a parameter submitted from the editor form.
///
/// `current` is the parameter being edited, or `None` when adding a new one.
/// Adding validates the name against the existing list, enforces the
/// parameter count limit and emits an insert command placing the new token
/// at the cursor. Editing keeps the name (it is immutable once created),
/// resets the value when the type changed, and for dropdowns deduplicates
/// the options and remaps the stored value against them.
pub fn save_parameter(
    mut draft: Parameter,
    current: Option<&Parameter>,
    params: &[Parameter],
    cursor: CursorPos,
    limits: &Limits,
) -> Result<EditOutcome> {
    match current {
        Some(current) => {
            draft.name = current.name.clone();

            if draft.param_type != current.param_type {
                draft.value = ParamValue::Null;
            }
            normalize(&mut draft, limits)?;
            if draft.param_type == ParamType::Dropdown {
                let options = draft.options_list();
                draft.value = remap_dropdown_value(&draft, current, &options);
            }

            let params = params
                .iter()
                .map(|p| {
                    if p.name == current.name {
                        draft.clone()
                    } else {
                        p.clone()
                    }
                })
                .collect();
            Ok(EditOutcome {
                params,
                command: None,
            })
        }
        None => {
            if params.len() >= limits.max_parameters {
                return Err(Error::ParamLimitExceeded {
                    limit: limits.max_parameters,
                });
            }
            let existing: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
            validate::validate_name(&draft.name, &existing)?;
            normalize(&mut draft, limits)?;

            let token = placeholder_token(&draft.name);
            let command = EditCommand::InsertToken {
                at: cursor,
                cursor_after: CursorPos {
                    row: cursor.row,
                    column: cursor.column + token.chars().count(),
                },
                text: token,
            };

            let mut params = params.to_vec();
            params.push(draft);
            Ok(EditOutcome {
                params,
                command: Some(command),
            })
        }
    }
}

/// Bind a new value to a named parameter, returning the next list
pub fn set_value(params: &[Parameter], name: &str, value: ParamValue) -> Result<Vec<Parameter>> {
    let param = params
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| Error::UnknownParameter {
            name: name.to_string(),
        })?;
    validate::validate_value(param, &value)?;

    Ok(params
        .iter()
        .map(|p| {
            if p.name == name {
                let mut updated = p.clone();
                updated.value = value.clone();
                updated
            } else {
                p.clone()
            }
        })
        .collect())
}

/// Remove a parameter, emitting the command that strips its token from the
/// SQL text
pub fn delete_parameter(params: &[Parameter], name: &str) -> Result<EditOutcome> {
    if !params.iter().any(|p| p.name == name) {
        return Err(Error::UnknownParameter {
            name: name.to_string(),
        });
    }
    let params = params.iter().filter(|p| p.name != name).cloned().collect();
    Ok(EditOutcome {
        params,
        command: Some(EditCommand::RemoveToken {
            text: placeholder_token(name),
        }),
    })
}

/// Dropdown invariants: options required, deduplicated and within limits;
/// non-dropdown parameters carry no options or multi-select configuration
fn normalize(draft: &mut Parameter, limits: &Limits) -> Result<()> {
    if draft.param_type == ParamType::Dropdown {
        if draft.options.trim().is_empty() {
            return Err(Error::OptionsRequired {
                name: draft.name.clone(),
            });
        }
        draft.options = dedup_options(&draft.options);
        validate::validate_options(&draft.options, limits)?;
    } else {
        draft.options = String::new();
        draft.multi_values_options = None;
    }
    Ok(())
}
