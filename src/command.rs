#![forbid(unsafe_code)]

//! Command-line tokenizer: argv to structured command data
//!
//! Grammar, scanned once left to right with no backtracking:
//!
//! ```text
//! name argument* (optionKey value?)*
//! ```
//!
//! Tokens are either literals or option keys; option keys start with a
//! hyphen. Positional arguments must therefore be contiguous at the front.

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors produced while tokenizing argv
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The first token started with the option prefix
    #[error("'{0}' is not a valid command name.")]
    InvalidName(String),

    /// A literal token appeared after the options began
    #[error("Found an argument '{0}' where an option was expected.")]
    LiteralWhereOptionExpected(String),

    /// The same option key appeared twice
    #[error("The option '{0}' has already been specified.")]
    DuplicateOption(String),

    /// An option name or value was blank
    #[error("An option name and value must not be blank.")]
    BlankOption,
}

/// A named option token and its value, both non-blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    pub name: String,
    pub value: String,
}

impl CommandOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, ParseError> {
        let name = name.into();
        let value = value.into();
        if name.trim().is_empty() || value.trim().is_empty() {
            return Err(ParseError::BlankOption);
        }
        Ok(CommandOption { name, value })
    }
}

/// One parsed command-line invocation, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    arguments: Vec<String>,
    options: BTreeMap<String, String>,
}

impl Command {
    /// Tokenizes argv into a [`Command`].
    ///
    /// Zero tokens synthesize the implicit `help` command rather than
    /// failing. The command name and option keys are case-folded; argument
    /// and option values are kept verbatim.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Command, ParseError> {
        if args.is_empty() {
            return Ok(Command {
                name: "help".to_string(),
                arguments: Vec::new(),
                options: BTreeMap::new(),
            });
        }

        let mut tokens = args.iter().map(|s| s.as_ref()).peekable();

        let name = parse_name(tokens.next().unwrap_or_default())?;

        let mut arguments = Vec::new();
        while let Some(token) = tokens.peek() {
            if !is_literal(token) {
                break;
            }
            arguments.push(tokens.next().unwrap_or_default().to_string());
        }

        let mut options = BTreeMap::new();
        while let Some(token) = tokens.next() {
            let key = token.to_lowercase();
            if is_literal(&key) {
                return Err(ParseError::LiteralWhereOptionExpected(key));
            }
            if options.contains_key(&key) {
                return Err(ParseError::DuplicateOption(key));
            }
            let value = match tokens.peek() {
                Some(next) if is_literal(next) => tokens.next().unwrap_or_default().to_string(),
                _ => "true".to_string(),
            };
            options.insert(key, value);
        }

        Ok(Command {
            name,
            arguments,
            options,
        })
    }

    /// The case-folded command name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Positional arguments in the order given
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Named options as (key, value) pairs, keys unique
    pub fn options(&self) -> impl Iterator<Item = CommandOption> + '_ {
        self.options.iter().map(|(name, value)| CommandOption {
            name: name.clone(),
            value: value.clone(),
        })
    }

    /// The raw option map backing [`Command::options`]
    pub fn raw_options(&self) -> &BTreeMap<String, String> {
        &self.options
    }
}

fn parse_name(raw: &str) -> Result<String, ParseError> {
    let name = raw.trim().to_lowercase();
    if is_literal(&name) {
        Ok(name)
    } else {
        Err(ParseError::InvalidName(raw.to_string()))
    }
}

/// Tokens are either literals or option keys, which start with a hyphen.
fn is_literal(value: &str) -> bool {
    !value.starts_with('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_args_yields_help() {
        let command = Command::parse::<&str>(&[]).unwrap();
        assert_eq!(command.name(), "help");
        assert!(command.arguments().is_empty());
        assert_eq!(command.options().count(), 0);
    }

    #[test]
    fn test_parse_arguments_and_options() {
        let command = Command::parse(&["copy", "a", "b", "-s", "-u", "x"]).unwrap();
        assert_eq!(command.name(), "copy");
        assert_eq!(command.arguments(), ["a", "b"]);
        assert_eq!(command.options().count(), 2);
        assert_eq!(command.raw_options().get("-s").map(String::as_str), Some("true"));
        assert_eq!(command.raw_options().get("-u").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_parse_name_only() {
        let command = Command::parse(&["copy"]).unwrap();
        assert_eq!(command.name(), "copy");
        assert!(command.arguments().is_empty());
        assert_eq!(command.options().count(), 0);
    }

    #[test]
    fn test_parse_options_without_arguments() {
        let command = Command::parse(&["copy", "-s", "-u", "asip0n"]).unwrap();
        assert!(command.arguments().is_empty());
        assert_eq!(command.raw_options().get("-s").map(String::as_str), Some("true"));
        assert_eq!(command.raw_options().get("-u").map(String::as_str), Some("asip0n"));
    }

    #[test]
    fn test_parse_preserves_argument_text() {
        let command =
            Command::parse(&["copy", "c:\\source\\lipsum.txt", "c:\\target\\lipsum.txt"]).unwrap();
        assert_eq!(
            command.arguments(),
            ["c:\\source\\lipsum.txt", "c:\\target\\lipsum.txt"]
        );
    }

    #[test]
    fn test_parse_name_is_trimmed_and_case_folded() {
        let command = Command::parse(&["  Copy  "]).unwrap();
        assert_eq!(command.name(), "copy");
    }

    #[test]
    fn test_parse_option_keys_are_case_folded() {
        let command = Command::parse(&["copy", "-Silent"]).unwrap();
        assert!(command.raw_options().contains_key("-silent"));
    }

    #[test]
    fn test_parse_literal_after_options_fails() {
        let result = Command::parse(&["copy", "a", "b", "-s", "lit", "x"]);
        // "-s" consumes "lit" as its value; "x" then appears where an option
        // key was expected.
        assert_eq!(
            result,
            Err(ParseError::LiteralWhereOptionExpected("x".to_string()))
        );
    }

    #[test]
    fn test_parse_duplicate_option_fails() {
        let result = Command::parse(&["copy", "-s", "-s"]);
        assert_eq!(result, Err(ParseError::DuplicateOption("-s".to_string())));
    }

    #[test]
    fn test_parse_duplicate_option_detection_is_case_insensitive() {
        let result = Command::parse(&["copy", "-s", "-S"]);
        assert_eq!(result, Err(ParseError::DuplicateOption("-s".to_string())));
    }

    #[test]
    fn test_parse_prefixed_name_fails() {
        let result = Command::parse(&["-copy"]);
        assert_eq!(result, Err(ParseError::InvalidName("-copy".to_string())));
    }

    #[test]
    fn test_parse_option_without_value_defaults_to_true() {
        let command = Command::parse(&["copy", "-verbose"]).unwrap();
        assert_eq!(
            command.raw_options().get("-verbose").map(String::as_str),
            Some("true")
        );
    }

    #[test]
    fn test_parse_option_value_is_kept_verbatim() {
        let command = Command::parse(&["copy", "-u", "MixedCase"]).unwrap();
        assert_eq!(
            command.raw_options().get("-u").map(String::as_str),
            Some("MixedCase")
        );
    }

    #[test]
    fn test_command_option_structural_equality() {
        let a = CommandOption::new("-s", "true").unwrap();
        let b = CommandOption::new("-s", "true").unwrap();
        let c = CommandOption::new("-s", "false").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_command_option_rejects_blank_parts() {
        assert_eq!(CommandOption::new("", "x"), Err(ParseError::BlankOption));
        assert_eq!(CommandOption::new("-s", "  "), Err(ParseError::BlankOption));
    }

    #[test]
    fn test_options_iterator_yields_command_options() {
        let command = Command::parse(&["copy", "-s", "-u", "x"]).unwrap();
        let options: Vec<CommandOption> = command.options().collect();
        assert!(options.contains(&CommandOption::new("-s", "true").unwrap()));
        assert!(options.contains(&CommandOption::new("-u", "x").unwrap()));
    }
}
