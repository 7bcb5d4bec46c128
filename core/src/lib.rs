//! Command routing, flag validation, and error classification for console
//! applications.
//!
//! This crate is the decision core of a command-line application:
//!
//! - [`CommandRegistry`] — the static map from command keys (one optional
//!   subcommand level) to handlers and their [`OptionSchema`]s.
//! - [`Dispatcher`] — resolves a parsed [`Invocation`] to global help, the
//!   version banner, per-command help, or handler execution.
//! - [`validate_flags`] — fail-fast check of supplied flags against the
//!   resolved command's schema.
//! - [`ErrorClassifier`] — routes failures: expected user mistakes
//!   ([`DispatchError::NotFound`]) print to the terminal, everything else is
//!   logged through a [`LogSink`] at a code-mapped severity.
//!
//! Token scanning of `argv` is the caller's concern; the `conroute` binary
//! crate ships a scanner that produces [`Invocation`] values.
//!
//! # Example
//!
//! ```
//! use conroute_core::{
//!     AppContext, CommandEntry, CommandKey, CommandRegistry, Dispatcher, FlagValue,
//!     HandlerError, Invocation, OptionDef, OptionSchema, Outcome,
//! };
//!
//! fn build() -> Result<(), HandlerError> {
//!     Ok(())
//! }
//!
//! let mut registry = CommandRegistry::new();
//! registry.register(
//!     CommandEntry::new(CommandKey::new("build"), build)
//!         .with_description("Compile the project")
//!         .with_options(OptionSchema::new().with_option(OptionDef::new(&["f", "force"]))),
//! )?;
//!
//! let context = AppContext::new("myapp", "1.2.0");
//! let dispatcher = Dispatcher::new(&registry, &context);
//!
//! let outcome = dispatcher.dispatch(
//!     &Invocation::new("myapp")
//!         .with_command("build")
//!         .with_flag("--force", FlagValue::Present),
//! )?;
//! assert_eq!(outcome, Outcome::Completed);
//! # Ok::<(), conroute_core::DispatchError>(())
//! ```

pub mod classify;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod help;
pub mod invocation;
pub mod registry;
pub mod schema;
pub mod validate;

pub use classify::{ErrorClassifier, ErrorRecord, LogSink, Severity, SeverityMap, TracingSink};
pub use context::AppContext;
pub use dispatch::{Dispatcher, Outcome};
pub use error::{DispatchError, HandlerError, SourceLocation};
pub use help::{render_command_help, render_global_help, render_version};
pub use invocation::{FlagValue, Invocation};
pub use registry::{CommandEntry, CommandHandler, CommandKey, CommandRegistry, RegistryError};
pub use schema::{OptionDef, OptionSchema};
pub use validate::{UnknownFlag, validate_flags};

/// Version of the dispatch engine, reported in the version banner alongside
/// the application's own version.
pub const FRAMEWORK_VERSION: &str = env!("CARGO_PKG_VERSION");
