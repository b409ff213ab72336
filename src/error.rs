#![forbid(unsafe_code)]

//! The top-level error type
//!
//! Every failure kind propagates unchanged to the one top-level catch, which
//! prints the message and continues; no distinct exit code exists per kind.

use crate::command::ParseError;
use crate::descriptor::{InvocationError, RegistrationError};
use crate::handler::HandlerError;
use crate::registry::LookupError;
use thiserror::Error;

/// Any failure on the parse → lookup → bind → execute chain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error(transparent)]
    Handler(#[from] HandlerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_displays_inner_message_unchanged() {
        let error: Error = ParseError::InvalidName("-copy".to_string()).into();
        assert_eq!(error.to_string(), "'-copy' is not a valid command name.");

        let error: Error = LookupError::UnknownCommand("move".to_string()).into();
        assert_eq!(
            error.to_string(),
            "'move' is not a command. See 'help' for the list of commands."
        );

        let error: Error = HandlerError::new("boom").into();
        assert_eq!(error.to_string(), "boom");
    }

    #[test]
    fn test_invocation_error_converts() {
        let error: Error = InvocationError::TooManyArguments.into();
        assert!(matches!(error, Error::Invocation(_)));
    }
}
