#![forbid(unsafe_code)]

//! Declarative handler and parameter metadata
//!
//! These builders are the registration-time stand-in for decorations on the
//! handler declaration: description, alias set, and the argument/option
//! markers with their raw defaults. A spec records what was declared; the
//! descriptor layer validates it against the invocation contract.

use crate::handler::{Handler, HandlerFactory};
use crate::value::ValueKind;
use thiserror::Error;

/// Description used when a handler or parameter declares none
pub const NO_DESCRIPTION: &str = "No description available.";

/// Errors produced when a decoration itself is malformed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    /// An alias string was empty or whitespace-only
    #[error("An alias list must not be blank.")]
    BlankAliases,

    /// A description string was empty or whitespace-only
    #[error("A description must not be blank.")]
    BlankDescription,
}

/// A parsed alias set: whitespace-separated names, trimmed and case-folded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasSet(Vec<String>);

impl AliasSet {
    /// Splits a raw alias string. A blank input is an error; `None` yields
    /// the empty set.
    pub fn parse(raw: Option<&str>) -> Result<AliasSet, MetadataError> {
        let Some(raw) = raw else {
            return Ok(AliasSet(Vec::new()));
        };
        if raw.trim().is_empty() {
            return Err(MetadataError::BlankAliases);
        }
        let names = raw
            .split_whitespace()
            .map(|alias| alias.trim().to_lowercase())
            .collect();
        Ok(AliasSet(names))
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

/// Resolves a declared description, falling back to [`NO_DESCRIPTION`]
pub fn resolve_description(raw: Option<&str>) -> Result<String, MetadataError> {
    match raw {
        None => Ok(NO_DESCRIPTION.to_string()),
        Some(text) if text.trim().is_empty() => Err(MetadataError::BlankDescription),
        Some(text) => Ok(text.to_string()),
    }
}

/// The argument marker, with its optional raw default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentMarker {
    pub default: Option<String>,
}

/// The option marker, with its mandatory raw default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionMarker {
    pub default: String,
}

/// Declarative metadata for one handler parameter
///
/// An unmarked parameter is a required argument. Marking a parameter as both
/// an argument and an option is representable here and rejected at
/// registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub(crate) ident: String,
    pub(crate) ty: ValueKind,
    pub(crate) argument: Option<ArgumentMarker>,
    pub(crate) option: Option<OptionMarker>,
    pub(crate) aliases: Option<String>,
    pub(crate) description: Option<String>,
}

impl ParamSpec {
    pub fn new(ident: impl Into<String>, ty: ValueKind) -> Self {
        ParamSpec {
            ident: ident.into(),
            ty,
            argument: None,
            option: None,
            aliases: None,
            description: None,
        }
    }

    /// Marks the parameter as a required positional argument.
    pub fn argument(mut self) -> Self {
        self.argument = Some(ArgumentMarker { default: None });
        self
    }

    /// Marks the parameter as a positional argument with a default, making
    /// it optional on the command line.
    pub fn argument_default(mut self, default: impl Into<String>) -> Self {
        self.argument = Some(ArgumentMarker {
            default: Some(default.into()),
        });
        self
    }

    /// Marks the parameter as a named option. Options always carry a
    /// default, used when the invocation names neither the option nor one of
    /// its aliases.
    pub fn option(mut self, default: impl Into<String>) -> Self {
        self.option = Some(OptionMarker {
            default: default.into(),
        });
        self
    }

    /// Declares aliases as a whitespace-separated string.
    pub fn alias(mut self, aliases: impl Into<String>) -> Self {
        self.aliases = Some(aliases.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// A parameter binds by name exactly when it carries the option marker.
    pub(crate) fn is_option_marked(&self) -> bool {
        self.option.is_some()
    }
}

/// Declarative metadata for one handler registration
pub struct HandlerSpec {
    pub(crate) ident: String,
    pub(crate) description: Option<String>,
    pub(crate) aliases: Option<String>,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) factory: HandlerFactory,
}

impl HandlerSpec {
    /// Starts a spec for the handler type named `ident`, constructed by
    /// `factory` once per invocation.
    pub fn new<H, F>(ident: impl Into<String>, factory: F) -> Self
    where
        H: Handler + 'static,
        F: Fn() -> H + 'static,
    {
        HandlerSpec {
            ident: ident.into(),
            description: None,
            aliases: None,
            params: Vec::new(),
            factory: Box::new(move || Box::new(factory())),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declares command aliases as a whitespace-separated string.
    pub fn alias(mut self, aliases: impl Into<String>) -> Self {
        self.aliases = Some(aliases.into());
        self
    }

    /// Appends one parameter, in declaration order.
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_set_splits_on_whitespace() {
        let aliases = AliasSet::parse(Some("/? ?")).unwrap();
        assert_eq!(aliases.names(), ["/?", "?"]);
    }

    #[test]
    fn test_alias_set_trims_and_case_folds() {
        let aliases = AliasSet::parse(Some("  Del \t REMOVE ")).unwrap();
        assert_eq!(aliases.names(), ["del", "remove"]);
    }

    #[test]
    fn test_alias_set_blank_fails() {
        assert_eq!(AliasSet::parse(Some("   ")), Err(MetadataError::BlankAliases));
        assert_eq!(AliasSet::parse(Some("")), Err(MetadataError::BlankAliases));
    }

    #[test]
    fn test_alias_set_absent_is_empty() {
        assert!(AliasSet::parse(None).unwrap().names().is_empty());
    }

    #[test]
    fn test_description_falls_back_when_absent() {
        assert_eq!(resolve_description(None).unwrap(), NO_DESCRIPTION);
    }

    #[test]
    fn test_description_passes_through() {
        assert_eq!(
            resolve_description(Some("Adds two integers.")).unwrap(),
            "Adds two integers."
        );
    }

    #[test]
    fn test_description_blank_fails() {
        assert_eq!(
            resolve_description(Some("  ")),
            Err(MetadataError::BlankDescription)
        );
    }

    #[test]
    fn test_unmarked_param_is_not_option_marked() {
        let param = ParamSpec::new("source", ValueKind::Text);
        assert!(!param.is_option_marked());
        assert!(param.argument.is_none());
    }

    #[test]
    fn test_argument_default_records_raw_string() {
        let param = ParamSpec::new("count", ValueKind::I32).argument_default("5");
        assert_eq!(
            param.argument,
            Some(ArgumentMarker {
                default: Some("5".to_string())
            })
        );
    }

    #[test]
    fn test_option_marker_records_mandatory_default() {
        let param = ParamSpec::new("verbose", ValueKind::Bool).option("false");
        assert!(param.is_option_marked());
        assert_eq!(
            param.option,
            Some(OptionMarker {
                default: "false".to_string()
            })
        );
    }

    #[test]
    fn test_param_can_carry_both_markers() {
        // Representable on purpose; the descriptor layer rejects it.
        let param = ParamSpec::new("x", ValueKind::Text).argument().option("a");
        assert!(param.argument.is_some());
        assert!(param.option.is_some());
    }
}
