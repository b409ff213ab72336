#![forbid(unsafe_code)]

//! Handler descriptors: contract validation at registration, binding at
//! invocation
//!
//! A descriptor is the validated, immutable schema derived from a handler's
//! declared metadata. Every contract check runs once, at creation; a built
//! descriptor binds and invokes without re-validating.

use crate::app::Context;
use crate::command::Command;
use crate::handler::HandlerFactory;
use crate::meta::{self, AliasSet, HandlerSpec, ParamSpec};
use crate::name::{self, NameError};
use crate::option_bag::OptionBag;
use crate::value::{self, ConversionError, Value, ValueKind};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Errors raised while validating a handler spec against the invocation
/// contract. These are startup-fatal for the handler being registered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error(transparent)]
    Name(#[from] NameError),

    #[error(transparent)]
    Metadata(#[from] meta::MetadataError),

    /// A parameter was marked as both an argument and an option
    #[error("The parameter '{parameter}' on handler '{handler}' is marked as both an argument and an option.")]
    BothMarkers { handler: String, parameter: String },

    /// An argument-marked parameter followed an option-marked one
    #[error("Handler '{handler}' has argument '{parameter}' following its option parameters.")]
    ArgumentAfterOption { handler: String, parameter: String },

    /// A declared default does not parse to the parameter's type
    #[error("The default value '{default}' for parameter '{parameter}' on handler '{handler}' cannot be parsed to the parameter's type.")]
    UnparseableDefault {
        handler: String,
        parameter: String,
        default: String,
    },

    /// Two option parameters of one handler collide on a name or alias
    #[error("The option name or alias '{name}' is declared more than once on handler '{handler}'.")]
    DuplicateOptionName { handler: String, name: String },

    /// Two registered handlers collide on a command name or alias
    #[error("The name or alias '{0}' is registered more than once.")]
    DuplicateCommandName(String),
}

/// Errors raised while binding a parsed command to a descriptor
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvocationError {
    #[error("A value must be provided for argument '{0}'.")]
    MissingArgument(String),

    #[error("Too many arguments.")]
    TooManyArguments,

    #[error("The option '{0}' is not recognized.")]
    UnknownOption(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Whether a parameter binds by position or by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Argument,
    Option,
}

/// The validated schema of one handler parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    ident: String,
    kind: ParameterKind,
    ty: ValueKind,
    cli_name: String,
    aliases: Vec<String>,
    description: String,
    default: Option<String>,
}

impl ParameterDescriptor {
    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    pub fn is_argument(&self) -> bool {
        self.kind == ParameterKind::Argument
    }

    pub fn is_option(&self) -> bool {
        self.kind == ParameterKind::Option
    }

    pub fn ty(&self) -> ValueKind {
        self.ty
    }

    /// The CLI form of the declared identifier; options carry their leading
    /// hyphen.
    pub fn cli_name(&self) -> &str {
        &self.cli_name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Primary name first, then aliases in declaration order.
    pub fn name_and_aliases(&self) -> Vec<String> {
        let mut names = vec![self.cli_name.clone()];
        names.extend(self.aliases.iter().cloned());
        names
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The raw default string; always present for options.
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

/// The validated, immutable schema of one registered handler
pub struct HandlerDescriptor {
    name: String,
    aliases: Vec<String>,
    description: String,
    parameters: Vec<ParameterDescriptor>,
    factory: HandlerFactory,
}

impl fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl HandlerDescriptor {
    /// Validates a handler spec and builds its descriptor.
    pub fn create(spec: HandlerSpec) -> Result<HandlerDescriptor, RegistrationError> {
        let HandlerSpec {
            ident,
            description,
            aliases,
            params,
            factory,
        } = spec;

        let name = name::to_command_name(&ident)?;
        let aliases = AliasSet::parse(aliases.as_deref())?
            .names()
            .iter()
            .map(|alias| name::to_command_alias(alias))
            .collect::<Result<Vec<String>, NameError>>()?;
        let description = meta::resolve_description(description.as_deref())?;
        let parameters = build_parameters(&ident, params)?;

        Ok(HandlerDescriptor {
            name,
            aliases,
            description,
            parameters,
            factory,
        })
    }

    /// The derived command name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Primary name first, then aliases in declaration order.
    pub fn name_and_aliases(&self) -> Vec<String> {
        let mut names = vec![self.name.clone()];
        names.extend(self.aliases.iter().cloned());
        names
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Parameter schemas, arguments first then options
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Binds a parsed command to this descriptor's parameters, producing the
    /// typed values in declared order: arguments first, then options.
    pub fn bind(&self, command: &Command) -> Result<Vec<Value>, InvocationError> {
        let split = self
            .parameters
            .iter()
            .position(ParameterDescriptor::is_option)
            .unwrap_or(self.parameters.len());
        let (argument_params, option_params) = self.parameters.split_at(split);

        let mut values = Vec::with_capacity(self.parameters.len());

        // Positional tokens bind left to right; a parameter past the end of
        // the token list falls back to its declared default, if any.
        let mut tokens = command.arguments().iter();
        for param in argument_params {
            if let Some(token) = tokens.next() {
                values.push(value::parse(token, param.ty())?);
            } else if let Some(default) = param.default() {
                values.push(value::parse(default, param.ty())?);
            } else {
                return Err(InvocationError::MissingArgument(
                    param.cli_name().to_string(),
                ));
            }
        }
        if tokens.next().is_some() {
            return Err(InvocationError::TooManyArguments);
        }

        // Named tokens are claimed by primary name, then aliases in order;
        // a miss uses the mandatory default.
        let mut bag = OptionBag::fill(command);
        for param in option_params {
            match bag.take(&param.name_and_aliases()) {
                Some(token) => values.push(value::parse(&token, param.ty())?),
                None => {
                    let default = param.default().unwrap_or("");
                    values.push(value::parse(default, param.ty())?);
                }
            }
        }
        if let Some(leftover) = bag.remaining().next() {
            return Err(InvocationError::UnknownOption(leftover.to_string()));
        }

        Ok(values)
    }

    /// Binds the command, builds one handler instance, and runs it. The
    /// instance is dropped when this returns, on either path.
    pub fn invoke(&self, ctx: &Context<'_>, command: &Command) -> Result<(), crate::error::Error> {
        let values = self.bind(command)?;
        let mut handler = (self.factory)();
        handler.execute(ctx, &values)?;
        Ok(())
    }
}

/// Walks the declared parameters in two phases, arguments then options,
/// mirroring the ordering invariant: once an option-marked parameter is
/// seen, no argument-marked parameter may follow.
fn build_parameters(
    handler: &str,
    params: Vec<ParamSpec>,
) -> Result<Vec<ParameterDescriptor>, RegistrationError> {
    let mut result = Vec::with_capacity(params.len());
    let mut iter = params.into_iter().peekable();

    while let Some(param) = iter.next_if(|p| !p.is_option_marked()) {
        result.push(build_argument(handler, param)?);
    }

    let mut claimed_names = HashSet::new();
    for param in iter {
        result.push(build_option(handler, param, &mut claimed_names)?);
    }

    Ok(result)
}

fn build_argument(
    handler: &str,
    param: ParamSpec,
) -> Result<ParameterDescriptor, RegistrationError> {
    // Aliases declared on an argument are validated but never bound; only
    // options are matched by name.
    AliasSet::parse(param.aliases.as_deref())?;
    let description = meta::resolve_description(param.description.as_deref())?;

    let default = param.argument.and_then(|marker| marker.default);
    if let Some(default) = &default {
        ensure_default_parses(handler, &param.ident, default, param.ty)?;
    }

    Ok(ParameterDescriptor {
        cli_name: name::to_argument_name(&param.ident),
        ident: param.ident,
        kind: ParameterKind::Argument,
        ty: param.ty,
        aliases: Vec::new(),
        description,
        default,
    })
}

fn build_option(
    handler: &str,
    param: ParamSpec,
    claimed_names: &mut HashSet<String>,
) -> Result<ParameterDescriptor, RegistrationError> {
    if param.argument.is_some() && param.option.is_some() {
        return Err(RegistrationError::BothMarkers {
            handler: handler.to_string(),
            parameter: param.ident,
        });
    }
    let Some(marker) = param.option else {
        return Err(RegistrationError::ArgumentAfterOption {
            handler: handler.to_string(),
            parameter: param.ident,
        });
    };

    let cli_name = name::to_option_name(&param.ident)?;
    let aliases = AliasSet::parse(param.aliases.as_deref())?
        .names()
        .iter()
        .map(|alias| name::to_option_name(alias))
        .collect::<Result<Vec<String>, NameError>>()?;
    let description = meta::resolve_description(param.description.as_deref())?;

    for name in std::iter::once(&cli_name).chain(aliases.iter()) {
        if !claimed_names.insert(name.clone()) {
            return Err(RegistrationError::DuplicateOptionName {
                handler: handler.to_string(),
                name: name.clone(),
            });
        }
    }

    ensure_default_parses(handler, &param.ident, &marker.default, param.ty)?;

    Ok(ParameterDescriptor {
        ident: param.ident,
        kind: ParameterKind::Option,
        ty: param.ty,
        cli_name,
        aliases,
        description,
        default: Some(marker.default),
    })
}

fn ensure_default_parses(
    handler: &str,
    parameter: &str,
    default: &str,
    ty: ValueKind,
) -> Result<(), RegistrationError> {
    if value::can_parse(default, ty) {
        Ok(())
    } else {
        Err(RegistrationError::UnparseableDefault {
            handler: handler.to_string(),
            parameter: parameter.to_string(),
            default: default.to_string(),
        })
    }
}
