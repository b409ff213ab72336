#![forbid(unsafe_code)]

//! The handler capability: execute one command with bound, typed values

use crate::app::Context;
use crate::value::Value;
use thiserror::Error;

/// A domain error raised by a handler body
///
/// Handler failures carry only a message; the top-level catch prints it the
/// same way it prints binding and parse failures.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct HandlerError(String);

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        HandlerError(message.into())
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        HandlerError(message)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        HandlerError(message.to_string())
    }
}

/// One command's behavior
///
/// A fresh instance is built by the descriptor's factory for every
/// invocation and dropped as soon as `execute` returns, so a handler holding
/// a releasable resource releases it through `Drop` on success and failure
/// alike.
///
/// `values` holds the bound parameter values, arguments first then options,
/// in the order the parameters were declared.
pub trait Handler {
    fn execute(&mut self, ctx: &Context<'_>, values: &[Value]) -> Result<(), HandlerError>;
}

/// Builds a fresh handler instance per invocation
pub type HandlerFactory = Box<dyn Fn() -> Box<dyn Handler>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_displays_message() {
        let error = HandlerError::new("Divisor cannot be zero.");
        assert_eq!(error.to_string(), "Divisor cannot be zero.");
    }

    #[test]
    fn test_handler_error_from_string() {
        let error: HandlerError = "boom".into();
        assert_eq!(error, HandlerError::new("boom"));
    }
}
