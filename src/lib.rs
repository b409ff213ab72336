#![forbid(unsafe_code)]

//! Commandeer: declarative command-line routing
//!
//! Commandeer turns raw command-line tokens into validated, strongly-typed
//! invocations of command handlers. Handlers are registered declaratively:
//! a naming convention derives the command name, optional decorations add
//! descriptions, aliases, and defaults, and the binder matches parsed
//! tokens to typed parameters. No per-command parsing code is written by
//! hand.

pub mod app;
pub mod command;
pub mod descriptor;
pub mod error;
pub mod handler;
pub mod help;
pub mod meta;
pub mod name;
pub mod option_bag;
pub mod registry;
pub mod value;

// Re-export the types a consuming application touches directly.
pub use app::{App, Context, EXIT_ERROR, EXIT_SUCCESS};
pub use command::{Command, CommandOption, ParseError};
pub use descriptor::{HandlerDescriptor, InvocationError, ParameterDescriptor, RegistrationError};
pub use error::Error;
pub use handler::{Handler, HandlerError};
pub use meta::{HandlerSpec, ParamSpec};
pub use option_bag::OptionBag;
pub use registry::{LookupError, Registry};
pub use value::{ConversionError, Value, ValueKind};
