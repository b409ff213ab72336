#![forbid(unsafe_code)]

//! Application runner: the parse → lookup → invoke chain and its top-level
//! catch
//!
//! An [`App`] owns the registry, built once at startup and read-only for the
//! rest of the process. Dispatch threads an explicit [`Context`] through to
//! the handlers instead of relying on process-global state, so independent
//! apps and registries can coexist in one process (and in tests).

use crate::command::Command;
use crate::descriptor::RegistrationError;
use crate::error::Error;
use crate::help;
use crate::meta::HandlerSpec;
use crate::registry::Registry;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Exit code for a completed invocation
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for any failure; kinds are not distinguished
pub const EXIT_ERROR: i32 = 1;

/// Read-only view of the running application, threaded through dispatch to
/// every handler
pub struct Context<'a> {
    app_name: &'a str,
    registry: &'a Registry,
}

impl<'a> Context<'a> {
    pub fn new(app_name: &'a str, registry: &'a Registry) -> Context<'a> {
        Context { app_name, registry }
    }

    pub fn app_name(&self) -> &str {
        self.app_name
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }
}

/// One command-line application: a name plus its handler registry
pub struct App {
    name: String,
    registry: Registry,
    color_choice: ColorChoice,
}

impl App {
    /// Creates an app with the implicit help command pre-registered.
    pub fn new(name: impl Into<String>, color_choice: ColorChoice) -> App {
        let mut registry = Registry::new();
        registry
            .register(help::spec())
            .expect("the built-in help spec is valid");
        App {
            name: name.into(),
            registry,
            color_choice,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registers one handler. Registration failures are startup-fatal for
    /// the caller to surface; nothing is dispatched before registration
    /// completes.
    pub fn register(&mut self, spec: HandlerSpec) -> Result<(), RegistrationError> {
        self.registry.register(spec)
    }

    /// Runs the full chain for one argv and returns the process exit code.
    ///
    /// This is the top-level catch: any failure, from tokenizing through the
    /// handler body, is printed to stderr and mapped to the single generic
    /// error code. The process does not crash.
    pub fn run<S: AsRef<str>>(&self, args: &[S]) -> i32 {
        match self.dispatch(args) {
            Ok(()) => EXIT_SUCCESS,
            Err(error) => {
                self.print_error(&error);
                EXIT_ERROR
            }
        }
    }

    /// Parse → lookup → invoke, propagating every failure unchanged.
    pub fn dispatch<S: AsRef<str>>(&self, args: &[S]) -> Result<(), Error> {
        let command = Command::parse(args)?;
        let descriptor = self.registry.find(command.name())?;
        let ctx = Context::new(&self.name, &self.registry);
        descriptor.invoke(&ctx, &command)
    }

    fn print_error(&self, error: &Error) {
        let mut stderr = StandardStream::stderr(self.color_choice);
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
        let _ = writeln!(stderr, "{error}");
        let _ = stderr.reset();
    }
}
