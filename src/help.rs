#![forbid(unsafe_code)]

//! The implicit help command
//!
//! Registered by the app runner under `help` (aliases `/?` and `?`) and
//! synthesized by the tokenizer when argv is empty. Rendering is split from
//! writing: the `render_*` functions return plain strings so the output is
//! testable, and the handler writes them to stdout.

use crate::app::Context;
use crate::descriptor::{HandlerDescriptor, ParameterDescriptor};
use crate::handler::{Handler, HandlerError};
use crate::meta::{HandlerSpec, ParamSpec};
use crate::registry::LookupError;
use crate::value::{Value, ValueKind};
use std::io::{self, Write};

/// Builds the registration spec for the help handler.
pub fn spec() -> HandlerSpec {
    HandlerSpec::new("HelpHandler", || HelpHandler)
        .describe("Prints usage for the application or for a single command.")
        .alias("/? ?")
        .param(
            ParamSpec::new("command", ValueKind::Text)
                .argument_default("")
                .describe("The command to describe."),
        )
}

/// Prints the overview or, given a command name, that command's details
pub struct HelpHandler;

impl Handler for HelpHandler {
    fn execute(&mut self, ctx: &Context<'_>, values: &[Value]) -> Result<(), HandlerError> {
        let command_name = values.first().and_then(Value::as_text).unwrap_or("");

        let text = if command_name.trim().is_empty() {
            render_overview(ctx)
        } else {
            render_command(ctx, command_name).map_err(|e| HandlerError::new(e.to_string()))?
        };

        io::stdout()
            .write_all(text.as_bytes())
            .map_err(|e| HandlerError::new(e.to_string()))
    }
}

/// Renders the command listing: one name/description row per registered
/// handler, with the usage banner above and the per-command hint below.
pub fn render_overview(ctx: &Context<'_>) -> String {
    let mut out = String::new();
    let app = ctx.app_name();

    out.push('\n');
    out.push_str(&format!("usage: {app} <command> [<arguments>] [<options>]\n\n"));
    out.push_str("The following commands are supported by this application:\n\n");
    for descriptor in ctx.registry().descriptors() {
        out.push_str(&format!(
            "{:<20}{}\n",
            descriptor.name(),
            descriptor.description()
        ));
    }
    out.push('\n');
    out.push_str(&format!(
        "See '{app} help <command>' for details on a specific command.\n"
    ));
    out
}

/// Renders one command's details: names, description, a synthesized usage
/// line, and a block per parameter.
pub fn render_command(ctx: &Context<'_>, name: &str) -> Result<String, LookupError> {
    let descriptor = ctx.registry().find(name)?;
    let mut out = String::new();

    out.push('\n');
    out.push_str(&format!("{}\n\n", descriptor.name_and_aliases().join(", ")));
    out.push_str(&format!("Description: {}\n\n", descriptor.description()));
    out.push_str(&usage_line(ctx.app_name(), descriptor));
    out.push('\n');

    if !descriptor.parameters().is_empty() {
        out.push_str("\nParameters:\n");
        for parameter in descriptor.parameters() {
            out.push('\n');
            out.push_str(&format!("{}\n", parameter.name_and_aliases().join(", ")));
            out.push_str(&format!("    {}\n", parameter.description()));
            out.push_str(&format!("    Type: {}\n", parameter.ty()));
            if let Some(default) = parameter.default() {
                out.push_str(&format!("    Defaults to '{default}'\n"));
            }
        }
    }

    Ok(out)
}

fn usage_line(app: &str, descriptor: &HandlerDescriptor) -> String {
    let mut usage = format!("usage: {app} {}", descriptor.name());
    for parameter in descriptor.parameters() {
        usage.push(' ');
        usage.push_str(&parameter_usage(parameter));
    }
    usage
}

/// Arguments render `<name>`, or `[<name>]` when defaulted; options render
/// `[-name <value>]`.
fn parameter_usage(parameter: &ParameterDescriptor) -> String {
    if parameter.is_argument() {
        if parameter.default().is_some() {
            format!("[<{}>]", parameter.cli_name())
        } else {
            format!("<{}>", parameter.cli_name())
        }
    } else {
        format!("[{} <value>]", parameter.cli_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    struct NoopHandler;

    impl Handler for NoopHandler {
        fn execute(&mut self, _ctx: &Context<'_>, _values: &[Value]) -> Result<(), HandlerError> {
            Ok(())
        }
    }

    fn calculator_registry() -> Registry {
        let mut registry = Registry::new();
        registry.register(spec()).unwrap();
        registry
            .register(
                HandlerSpec::new("AddHandler", || NoopHandler)
                    .describe("Adds two integers together.")
                    .alias("+")
                    .param(
                        ParamSpec::new("a", ValueKind::I32)
                            .argument()
                            .describe("An integer."),
                    )
                    .param(
                        ParamSpec::new("b", ValueKind::I32)
                            .argument_default("0")
                            .describe("An integer."),
                    )
                    .param(
                        ParamSpec::new("show_sign", ValueKind::Bool)
                            .option("false")
                            .alias("s")
                            .describe("Prints the sign of the result."),
                    ),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_overview_lists_commands_and_descriptions() {
        let registry = calculator_registry();
        let ctx = Context::new("calc", &registry);
        let text = render_overview(&ctx);

        assert!(text.contains("usage: calc <command>"));
        assert!(text.contains("help"));
        assert!(text.contains("add"));
        assert!(text.contains("Adds two integers together."));
        assert!(text.contains("See 'calc help <command>'"));
    }

    #[test]
    fn test_command_help_names_and_aliases() {
        let registry = calculator_registry();
        let ctx = Context::new("calc", &registry);
        let text = render_command(&ctx, "add").unwrap();

        assert!(text.contains("add, +"));
        assert!(text.contains("Description: Adds two integers together."));
    }

    #[test]
    fn test_command_help_usage_line() {
        let registry = calculator_registry();
        let ctx = Context::new("calc", &registry);
        let text = render_command(&ctx, "add").unwrap();

        // Required argument bare, defaulted argument bracketed, option with
        // a value placeholder.
        assert!(text.contains("usage: calc add <a> [<b>] [-show-sign <value>]"));
    }

    #[test]
    fn test_command_help_parameter_blocks() {
        let registry = calculator_registry();
        let ctx = Context::new("calc", &registry);
        let text = render_command(&ctx, "add").unwrap();

        assert!(text.contains("-show-sign, -s"));
        assert!(text.contains("Prints the sign of the result."));
        assert!(text.contains("Type: i32"));
        assert!(text.contains("Type: bool"));
        assert!(text.contains("Defaults to 'false'"));
        assert!(text.contains("Defaults to '0'"));
    }

    #[test]
    fn test_command_help_resolves_aliases() {
        let registry = calculator_registry();
        let ctx = Context::new("calc", &registry);
        let text = render_command(&ctx, "+").unwrap();
        assert!(text.contains("Description: Adds two integers together."));
    }

    #[test]
    fn test_command_help_unknown_command_fails() {
        let registry = calculator_registry();
        let ctx = Context::new("calc", &registry);
        assert_eq!(
            render_command(&ctx, "subtract").unwrap_err(),
            LookupError::UnknownCommand("subtract".to_string())
        );
    }

    #[test]
    fn test_help_spec_registers_expected_names() {
        let registry = calculator_registry();
        let descriptor = registry.find("help").unwrap();
        assert_eq!(descriptor.name_and_aliases(), ["help", "/?", "?"]);
        assert!(registry.find("?").is_ok());
    }
}
