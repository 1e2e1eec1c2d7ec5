//! Error types for paramsync

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for paramsync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for paramsync
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("keyword is required")]
    #[diagnostic(code(paramsync::name_required))]
    NameRequired,

    #[error("keyword must be at least 3 characters")]
    #[diagnostic(code(paramsync::name_too_short))]
    NameTooShort { name: String },

    #[error("keyword cannot exceed 50 characters")]
    #[diagnostic(code(paramsync::name_too_long))]
    NameTooLong { name: String },

    #[error("keyword must start with a letter, can include numbers and underscores, but cannot end with an underscore")]
    #[diagnostic(code(paramsync::name_syntax))]
    NameSyntax { name: String },

    #[error("parameter keyword '{name}' already exists")]
    #[diagnostic(code(paramsync::duplicate_name))]
    DuplicateName { name: String },

    #[error("you can add up to {limit} query parameters")]
    #[diagnostic(code(paramsync::param_limit))]
    ParamLimitExceeded { limit: usize },

    #[error("you can only add up to {limit} options")]
    #[diagnostic(code(paramsync::option_limit))]
    OptionLimitExceeded { limit: usize },

    #[error("dropdown parameter '{name}' requires at least one option")]
    #[diagnostic(code(paramsync::options_required))]
    OptionsRequired { name: String },

    #[error("unknown parameter '{name}'")]
    #[diagnostic(code(paramsync::unknown_parameter))]
    UnknownParameter { name: String },

    #[error("invalid value for parameter '{name}': {message}")]
    #[diagnostic(code(paramsync::invalid_value))]
    InvalidValue { name: String, message: String },

    #[error("state error: {message}")]
    #[diagnostic(code(paramsync::state_error))]
    StateError { message: String },

    #[error("IO error: {0}")]
    #[diagnostic(code(paramsync::io_error))]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    #[diagnostic(code(paramsync::json_error))]
    JsonError(#[from] serde_json::Error),
}

/// Calculate line and column number from byte offset
pub fn offset_to_line_col(input: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, c) in input.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// Get the line content at a given line number (1-indexed)
pub fn get_line_content(input: &str, line_num: usize) -> Option<&str> {
    input.lines().nth(line_num.saturating_sub(1))
}

/// Format an invalid-placeholder report with source context
pub fn format_placeholder_report(input: &str, offset: usize, message: &str) -> String {
    let (line, col) = offset_to_line_col(input, offset);
    let line_content = get_line_content(input, line).unwrap_or("");

    // Pointer to the token position
    let pointer = " ".repeat(col.saturating_sub(1)) + "^";

    format!(
        "invalid placeholder at line {}, column {}:\n  |\n{:>3} | {}\n  | {}\n  = {}",
        line, col, line, line_content, pointer, message
    )
}
