#![forbid(unsafe_code)]

//! Registry of validated handler descriptors
//!
//! Built once at startup and read-only afterwards. Across the whole set, no
//! two descriptors may share any name or alias; lookup resolves a case-folded
//! command name to its descriptor.

use crate::descriptor::{HandlerDescriptor, RegistrationError};
use crate::meta::HandlerSpec;
use std::collections::HashSet;
use thiserror::Error;

/// Error raised when a command name resolves to no registered handler
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("'{0}' is not a command. See 'help' for the list of commands.")]
    UnknownCommand(String),
}

/// The set of registered handlers, keyed by every name and alias
#[derive(Debug, Default)]
pub struct Registry {
    descriptors: Vec<HandlerDescriptor>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry {
            descriptors: Vec::new(),
        }
    }

    /// Validates the spec, builds its descriptor, and adds it to the set.
    ///
    /// Fails when the descriptor itself is invalid or when any of its names
    /// or aliases is already claimed by a registered handler. Names are
    /// case-folded at derivation, so the check is case-insensitive.
    pub fn register(&mut self, spec: HandlerSpec) -> Result<(), RegistrationError> {
        let descriptor = HandlerDescriptor::create(spec)?;

        let mut claimed: HashSet<String> = self
            .descriptors
            .iter()
            .flat_map(HandlerDescriptor::name_and_aliases)
            .collect();
        for name in descriptor.name_and_aliases() {
            if !claimed.insert(name.clone()) {
                return Err(RegistrationError::DuplicateCommandName(name));
            }
        }

        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Resolves a command name or alias, trimmed and case-folded, to its
    /// descriptor.
    pub fn find(&self, name: &str) -> Result<&HandlerDescriptor, LookupError> {
        let needle = name.trim().to_lowercase();
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.name_and_aliases().contains(&needle))
            .ok_or_else(|| LookupError::UnknownCommand(name.to_string()))
    }

    /// All descriptors, in registration order
    pub fn descriptors(&self) -> &[HandlerDescriptor] {
        &self.descriptors
    }
}
