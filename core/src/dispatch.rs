//! The dispatch state machine.
//!
//! One invocation moves from `Start` to exactly one terminal state: global
//! help, version banner, per-command help, handler execution, or a failure.
//! There is no loop and no retry; the registry is read-only throughout.

use crate::context::AppContext;
use crate::error::DispatchError;
use crate::help::{render_command_help, render_global_help, render_version};
use crate::invocation::Invocation;
use crate::registry::CommandRegistry;
use crate::validate::validate_flags;

const HELP_ALIASES: [&str; 2] = ["h", "help"];
const VERSION_ALIASES: [&str; 2] = ["v", "version"];

/// Successful terminal state of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Global usage text was rendered.
    GlobalHelp(String),
    /// The version banner was rendered.
    Version(String),
    /// Per-command usage text was rendered.
    CommandHelp(String),
    /// A handler ran to completion.
    Completed,
}

impl Outcome {
    /// Rendered text of help/version outcomes.
    pub fn rendered(&self) -> Option<&str> {
        match self {
            Self::GlobalHelp(text) | Self::Version(text) | Self::CommandHelp(text) => Some(text),
            Self::Completed => None,
        }
    }
}

/// Resolves invocations against a registry and runs the matching handler.
///
/// # Examples
///
/// ```
/// use conroute_core::{
///     AppContext, CommandEntry, CommandKey, CommandRegistry, Dispatcher, HandlerError,
///     Invocation, Outcome,
/// };
///
/// fn noop() -> Result<(), HandlerError> {
///     Ok(())
/// }
///
/// let mut registry = CommandRegistry::new();
/// registry
///     .register(CommandEntry::new(CommandKey::new("build"), noop))
///     .unwrap();
/// let context = AppContext::new("app", "0.1.0");
/// let dispatcher = Dispatcher::new(&registry, &context);
///
/// let outcome = dispatcher
///     .dispatch(&Invocation::new("app").with_command("build"))
///     .unwrap();
/// assert_eq!(outcome, Outcome::Completed);
/// ```
pub struct Dispatcher<'a> {
    registry: &'a CommandRegistry,
    context: &'a AppContext,
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher over a built registry and application context.
    pub fn new(registry: &'a CommandRegistry, context: &'a AppContext) -> Self {
        Self { registry, context }
    }

    /// Resolves one invocation to its terminal state.
    ///
    /// Branch order follows the documented transition table: the global
    /// help/version/no-flags/unknown-flag branches when no command token was
    /// resolved, the per-command help branch when one was, then execution.
    pub fn dispatch(&self, invocation: &Invocation) -> Result<Outcome, DispatchError> {
        let script = invocation.script();

        if invocation.command().is_empty() && invocation.sub_command().is_empty() {
            if invocation.bool_flag(&HELP_ALIASES, false) {
                return Ok(Outcome::GlobalHelp(render_global_help(
                    self.registry,
                    script,
                )));
            }
            if invocation.bool_flag(&VERSION_ALIASES, false) {
                return Ok(Outcome::Version(render_version(self.context)));
            }
            // Zero arguments reads as "what can this do?": implicit help.
            if invocation.options().is_empty() {
                return Ok(Outcome::GlobalHelp(render_global_help(
                    self.registry,
                    script,
                )));
            }
            let (flag, _) = &invocation.options()[0];
            return Err(DispatchError::NotFound(format!(
                "flag provided but not defined: '{flag}', see '{script} --help'."
            )));
        }

        if invocation.bool_flag(&HELP_ALIASES, false) {
            return Ok(Outcome::CommandHelp(render_command_help(
                self.registry,
                script,
                &invocation.key(),
            )));
        }

        self.execute(invocation)
    }

    fn execute(&self, invocation: &Invocation) -> Result<Outcome, DispatchError> {
        let script = invocation.script();
        let key = invocation.key();

        let Some(entry) = self.registry.lookup_key(&key) else {
            return Err(DispatchError::NotFound(format!(
                "'{key}' is not command, see '{script} --help'."
            )));
        };

        validate_flags(entry, invocation).map_err(|unknown| {
            DispatchError::NotFound(format!(
                "flag provided but not defined: '{}', see '{script} {key} --help'.",
                unknown.flag
            ))
        })?;

        entry.handler().run()?;
        Ok(Outcome::Completed)
    }

    /// Dispatches and prints any rendered help/version text to stdout.
    pub fn run(&self, invocation: &Invocation) -> Result<Outcome, DispatchError> {
        let outcome = self.dispatch(invocation)?;
        if let Some(text) = outcome.rendered() {
            print!("{text}");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::HandlerError;
    use crate::invocation::FlagValue;
    use crate::registry::{CommandEntry, CommandKey};
    use crate::schema::{OptionDef, OptionSchema};

    fn noop() -> Result<(), HandlerError> {
        Ok(())
    }

    fn context() -> AppContext {
        AppContext::new("myapp", "1.2.0")
    }

    fn registry_with_counter() -> (CommandRegistry, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut registry = CommandRegistry::new();
        registry
            .register(
                CommandEntry::new(CommandKey::new("build"), move || -> Result<(), HandlerError> {
                    seen.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .with_description("Compile the project")
                .with_options(
                    OptionSchema::new()
                        .with_option(OptionDef::new(&["f", "force"]))
                        .with_option(OptionDef::new(&["o", "output"])),
                ),
            )
            .unwrap();
        registry
            .register(
                CommandEntry::new(CommandKey::with_subcommand("service", "start"), noop)
                    .with_description("Start the service"),
            )
            .unwrap();
        (registry, calls)
    }

    #[test]
    fn test_empty_invocation_renders_global_help() {
        let (registry, _) = registry_with_counter();
        let ctx = context();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        let outcome = dispatcher.dispatch(&Invocation::new("app")).unwrap();
        assert!(matches!(outcome, Outcome::GlobalHelp(_)));
    }

    #[test]
    fn test_zero_flags_equals_explicit_help() {
        let (registry, _) = registry_with_counter();
        let ctx = context();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        let implicit = dispatcher.dispatch(&Invocation::new("app")).unwrap();
        let explicit = dispatcher
            .dispatch(&Invocation::new("app").with_flag("--help", FlagValue::Present))
            .unwrap();
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn test_version_flag_renders_banner() {
        let (registry, _) = registry_with_counter();
        let ctx = context();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        let outcome = dispatcher
            .dispatch(&Invocation::new("app").with_flag("--version", FlagValue::Present))
            .unwrap();
        let Outcome::Version(banner) = outcome else {
            panic!("expected version outcome");
        };
        assert!(banner.starts_with("myapp version 1.2.0, framework version "));
    }

    #[test]
    fn test_unknown_global_flag_names_first_flag() {
        let (registry, _) = registry_with_counter();
        let ctx = context();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        let err = dispatcher
            .dispatch(
                &Invocation::new("app")
                    .with_flag("--bogus", FlagValue::Present)
                    .with_flag("--other", FlagValue::Present),
            )
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::NotFound(
                "flag provided but not defined: '--bogus', see 'app --help'.".to_string()
            )
        );
    }

    #[test]
    fn test_command_help_branch() {
        let (registry, calls) = registry_with_counter();
        let ctx = context();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        let outcome = dispatcher
            .dispatch(
                &Invocation::new("app")
                    .with_command("build")
                    .with_flag("-h", FlagValue::Present),
            )
            .unwrap();
        let Outcome::CommandHelp(text) = outcome else {
            panic!("expected command help outcome");
        };
        assert!(text.starts_with("Usage: app build [opt...]"));
        assert!(text.contains("-f, --force"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unknown_command_never_invokes_handler() {
        let (registry, calls) = registry_with_counter();
        let ctx = context();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        let err = dispatcher
            .dispatch(&Invocation::new("app").with_command("deploy"))
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::NotFound("'deploy' is not command, see 'app --help'.".to_string())
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_undeclared_flag_blocks_execution_with_scoped_hint() {
        let (registry, calls) = registry_with_counter();
        let ctx = context();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        let err = dispatcher
            .dispatch(
                &Invocation::new("app")
                    .with_command("build")
                    .with_flag("--force", FlagValue::Present)
                    .with_flag("--bogus", FlagValue::Present),
            )
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::NotFound(
                "flag provided but not defined: '--bogus', see 'app build --help'.".to_string()
            )
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_declared_flags_reach_handler() {
        let (registry, calls) = registry_with_counter();
        let ctx = context();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        let outcome = dispatcher
            .dispatch(
                &Invocation::new("app")
                    .with_command("build")
                    .with_flag("--force", FlagValue::Present)
                    .with_flag("-o", FlagValue::Value("dist".into())),
            )
            .unwrap();
        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subcommand_key_resolution() {
        let (registry, _) = registry_with_counter();
        let ctx = context();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        let outcome = dispatcher
            .dispatch(
                &Invocation::new("app")
                    .with_command("service")
                    .with_sub_command("start"),
            )
            .unwrap();
        assert_eq!(outcome, Outcome::Completed);
    }

    #[test]
    fn test_handler_failure_propagates() {
        let mut registry = CommandRegistry::new();
        registry
            .register(CommandEntry::new(
                CommandKey::new("fail"),
                || -> Result<(), HandlerError> { Err(HandlerError::new(9, "deliberate failure")) },
            ))
            .unwrap();
        let ctx = context();
        let dispatcher = Dispatcher::new(&registry, &ctx);

        let err = dispatcher
            .dispatch(&Invocation::new("app").with_command("fail"))
            .unwrap_err();
        let DispatchError::Handler(handler) = err else {
            panic!("expected handler failure");
        };
        assert_eq!(handler.code, 9);
    }
}
