#![forbid(unsafe_code)]

//! Calculator demo: two handlers registered against the commandeer core
//!
//! ```text
//! calc add 123 45
//! calc + 355 13
//! calc divide 121 11
//! calc div 10 3 -r
//! calc help divide
//! ```

use commandeer::{
    App, Context, Handler, HandlerError, HandlerSpec, ParamSpec, RegistrationError, Value,
    ValueKind, EXIT_ERROR,
};
use std::env;
use std::process;
use termcolor::ColorChoice;

struct AddHandler;

impl Handler for AddHandler {
    fn execute(&mut self, _ctx: &Context<'_>, values: &[Value]) -> Result<(), HandlerError> {
        match values {
            [Value::I32(a), Value::I32(b)] => {
                println!("{a} + {b} = {}", a + b);
                Ok(())
            }
            _ => Err(HandlerError::new("add received unexpected parameter values")),
        }
    }
}

struct DivideHandler;

impl Handler for DivideHandler {
    fn execute(&mut self, _ctx: &Context<'_>, values: &[Value]) -> Result<(), HandlerError> {
        match values {
            [Value::I32(dividend), Value::I32(divisor), Value::Bool(show_remainder)] => {
                if *divisor == 0 {
                    return Err(HandlerError::new("Divisor cannot be zero."));
                }
                if *show_remainder {
                    println!("{dividend} / {divisor} = {}r{}", dividend / divisor, dividend % divisor);
                } else {
                    println!("{dividend} / {divisor} = {}", dividend / divisor);
                }
                Ok(())
            }
            _ => Err(HandlerError::new("divide received unexpected parameter values")),
        }
    }
}

fn build_app() -> Result<App, RegistrationError> {
    let mut app = App::new("calc", ColorChoice::Auto);

    app.register(
        HandlerSpec::new("AddHandler", || AddHandler)
            .describe("Adds two integers together.")
            .alias("+")
            .param(ParamSpec::new("a", ValueKind::I32).argument().describe("An integer."))
            .param(ParamSpec::new("b", ValueKind::I32).argument().describe("An integer.")),
    )?;

    app.register(
        HandlerSpec::new("DivideHandler", || DivideHandler)
            .describe("Divides one integer value by another.")
            .alias("/ div")
            .param(
                ParamSpec::new("dividend", ValueKind::I32)
                    .argument()
                    .describe("The number to be divided into groups."),
            )
            .param(
                ParamSpec::new("divisor", ValueKind::I32)
                    .argument()
                    .describe("The number of groups into which to divide the dividend."),
            )
            .param(
                ParamSpec::new("show_remainder", ValueKind::Bool)
                    .option("false")
                    .alias("r")
                    .describe("When specified, shows the remainder of the operation."),
            ),
    )?;

    Ok(app)
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let code = match build_app() {
        Ok(app) => app.run(&args),
        Err(error) => {
            eprintln!("{error}");
            EXIT_ERROR
        }
    };

    process::exit(code);
}
