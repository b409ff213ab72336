#![forbid(unsafe_code)]

//! Naming convention: identifier ⟷ CLI-token conversion
//!
//! Handler types are recognized by the reserved `Handler` suffix on their
//! identifier. Identifiers are converted to CLI tokens by splitting at case
//! boundaries and underscores, lower-casing, and joining with hyphens.
//! Option tokens additionally carry exactly one leading hyphen.

use thiserror::Error;

/// Reserved suffix that marks a type identifier as a command handler
const HANDLER_SUFFIX: &str = "Handler";

/// Errors produced by identifier-to-token conversion
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    /// The input was empty or whitespace-only
    #[error("A name must not be blank.")]
    Blank,

    /// The identifier does not follow the handler naming convention
    #[error("'{0}' is not a handler name.")]
    NotAHandlerName(String),
}

/// Returns true when the identifier follows the handler naming convention:
/// it ends with the reserved suffix and has at least one character before it.
pub fn is_handler_name(value: &str) -> bool {
    value.len() > HANDLER_SUFFIX.len() && value.ends_with(HANDLER_SUFFIX)
}

/// Derives the command name from a handler identifier.
///
/// The reserved suffix is stripped before conversion:
/// `AddItemHandler` becomes `add-item`.
pub fn to_command_name(value: &str) -> Result<String, NameError> {
    if value.trim().is_empty() {
        return Err(NameError::Blank);
    }
    if !is_handler_name(value) {
        return Err(NameError::NotAHandlerName(value.to_string()));
    }

    let stem = &value[..value.len() - HANDLER_SUFFIX.len()];
    Ok(trim_hyphens(&to_cli_string(stem)))
}

/// Converts a declared handler alias to its CLI form: `AddItem` becomes
/// `add-item`, while punctuation aliases like `+` or `/?` pass through.
pub fn to_command_alias(value: &str) -> Result<String, NameError> {
    if value.trim().is_empty() {
        return Err(NameError::Blank);
    }
    Ok(trim_hyphens(&to_cli_string(value)))
}

/// Converts a parameter identifier to an option token with a single leading
/// hyphen: `showRemainder` and `show_remainder` both become `-show-remainder`.
pub fn to_option_name(value: &str) -> Result<String, NameError> {
    if value.trim().is_empty() {
        return Err(NameError::Blank);
    }
    Ok(add_leading_hyphen(&to_cli_string(value)))
}

/// Converts a parameter identifier to an argument token:
/// `copySource` becomes `copy-source`.
pub fn to_argument_name(value: &str) -> String {
    trim_hyphens(&to_cli_string(value))
}

/// Splits at case boundaries and underscores, lower-cases each segment, and
/// joins with hyphens. Uppercase letters contribute their own hyphen, so the
/// result may carry a leading hyphen for the callers to trim or keep.
fn to_cli_string(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '_' => result.push('-'),
            'A'..='Z' => {
                result.push('-');
                result.push(c.to_ascii_lowercase());
            }
            _ => result.push(c),
        }
    }
    result
}

/// Prefixing is idempotent: an already-prefixed token is returned unchanged.
fn add_leading_hyphen(value: &str) -> String {
    if value.starts_with('-') {
        value.to_string()
    } else {
        format!("-{value}")
    }
}

fn trim_hyphens(value: &str) -> String {
    value.trim_matches('-').to_string()
}
