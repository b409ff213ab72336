#![forbid(unsafe_code)]

//! Consume-once store for a command's named options
//!
//! Built from a parsed command at the start of option binding, drained as
//! each option parameter claims its token, and checked for leftovers at the
//! end. Keys are unique by construction because the tokenizer rejects
//! duplicate option keys.

use crate::command::Command;

/// The unclaimed options of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionBag {
    options: std::collections::BTreeMap<String, String>,
}

impl OptionBag {
    /// Fills the bag from a parsed command's options.
    pub fn fill(command: &Command) -> OptionBag {
        OptionBag {
            options: command.raw_options().clone(),
        }
    }

    /// Probes the given keys in order; the first present key is removed from
    /// the bag and its value returned.
    pub fn take(&mut self, keys: &[String]) -> Option<String> {
        for key in keys {
            if let Some(value) = self.options.remove(key) {
                return Some(value);
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Keys still unclaimed, in deterministic order
    pub fn remaining(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }
}
