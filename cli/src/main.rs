//! Demonstration console application for the conroute dispatch engine.
//!
//! Wires a small command set into a registry, scans `argv` into an
//! invocation, and routes failures through the error classifier: user
//! mistakes print to the terminal, everything else goes to the tracing sink
//! on stderr.

mod args;

use std::process::ExitCode;

use conroute_core::{
    AppContext, CommandEntry, CommandKey, CommandRegistry, DispatchError, Dispatcher,
    ErrorClassifier, HandlerError, Invocation, OptionDef, OptionSchema, RegistryError, Severity,
    SeverityMap, TracingSink,
};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let context = AppContext::new("conroute", VERSION)
        .with_debug(std::env::var_os("CONROUTE_DEBUG").is_some());
    let sink = TracingSink;
    let classifier = ErrorClassifier::new(&context, severity_map(), &sink);

    let invocation = args::scan(std::env::args());
    tracing::debug!(key = %invocation.key(), "dispatching");

    let registry = match build_registry(&invocation) {
        Ok(registry) => registry,
        Err(err) => {
            classifier.handle(&DispatchError::from(err));
            return ExitCode::FAILURE;
        }
    };

    let dispatcher = Dispatcher::new(&registry, &context);
    match dispatcher.run(&invocation) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            classifier.handle(&err);
            ExitCode::FAILURE
        }
    }
}

/// Demo severity mapping; applications configure their own codes.
fn severity_map() -> SeverityMap {
    SeverityMap::new()
        .assign(1, Severity::Error)
        .assign(2, Severity::Warning)
        .assign(8, Severity::Notice)
}

fn build_registry(invocation: &Invocation) -> Result<CommandRegistry, RegistryError> {
    let mut registry = CommandRegistry::new();

    let inv = invocation.clone();
    registry.register(
        CommandEntry::new(CommandKey::new("greet"), move || -> Result<(), HandlerError> {
            let name = inv
                .options()
                .iter()
                .find(|(flag, _)| flag == "-n" || flag == "--name")
                .and_then(|(_, value)| value.as_str())
                .unwrap_or("world");
            let greeting = format!("Hello, {name}!");
            if inv.bool_flag(&["s", "shout"], false) {
                println!("{}", greeting.to_uppercase());
            } else {
                println!("{greeting}");
            }
            Ok(())
        })
        .with_description("Print a greeting")
        .with_options(
            OptionSchema::new()
                .with_option(OptionDef::new(&["n", "name"]).with_description("Name to greet"))
                .with_option(OptionDef::new(&["s", "shout"]).with_description("Greet loudly")),
        ),
    )?;

    let inv = invocation.clone();
    registry.register(
        CommandEntry::new(
            CommandKey::with_subcommand("service", "start"),
            move || -> Result<(), HandlerError> {
                if inv.bool_flag(&["d", "detach"], false) {
                    println!("service started in background");
                } else {
                    println!("service started");
                }
                Ok(())
            },
        )
        .with_description("Start the demo service")
        .with_options(
            OptionSchema::new()
                .with_option(OptionDef::new(&["d", "detach"]).with_description("Run detached")),
        ),
    )?;

    registry.register(
        CommandEntry::new(
            CommandKey::with_subcommand("service", "stop"),
            || -> Result<(), HandlerError> {
                println!("service stopped");
                Ok(())
            },
        )
        .with_description("Stop the demo service"),
    )?;

    registry.register(
        CommandEntry::new(CommandKey::new("fail"), || -> Result<(), HandlerError> {
            Err(HandlerError::new(2, "induced failure for log routing").with_kind("demo"))
        })
        .with_description("Raise a handler failure to exercise log routing"),
    )?;

    Ok(registry)
}
