//! Command registry: the static map from command keys to handlers.
//!
//! The registry is built once at configuration time and read-only during
//! dispatch. Every entry pairs a [`CommandKey`] with a concrete handler and an
//! [`OptionSchema`]. Handlers are registered as values and type-checked at
//! registration, so there is no runtime name-based lookup or existence
//! probing; a miswired entry is rejected by [`CommandRegistry::register`]
//! before any dispatch happens.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::HandlerError;
use crate::schema::OptionSchema;

/// Registration-time errors.
///
/// Each variant describes a structural defect in the command configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Key nests deeper than one subcommand level.
    #[error("command key nests too deep: '{0}'")]
    NestingTooDeep(String),
    /// Two entries share the same key.
    #[error("duplicate command: '{0}'")]
    DuplicateCommand(String),
    /// An option definition has no aliases.
    #[error("option in '{0}' declares no aliases")]
    MissingAlias(String),
    /// An alias is empty, starts with a dash, or contains whitespace.
    #[error("invalid option alias '{alias}' in '{key}'")]
    InvalidAlias { key: String, alias: String },
    /// Two option definitions in one schema share an alias.
    #[error("duplicate option alias '{alias}' in '{key}'")]
    DuplicateAlias { key: String, alias: String },
}

/// Structured command address: a command name plus at most one subcommand.
///
/// The external key format stays the space-joined string (`"service start"`)
/// for compatibility with lookup and help output, but the pair is kept
/// structured internally so a space inside a name can never be misread as a
/// level separator.
///
/// # Examples
///
/// ```
/// use conroute_core::CommandKey;
///
/// let key: CommandKey = "service start".parse().unwrap();
/// assert_eq!(key.command(), "service");
/// assert_eq!(key.subcommand(), Some("start"));
/// assert_eq!(key.to_string(), "service start");
///
/// assert!("service start now".parse::<CommandKey>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandKey {
    command: String,
    subcommand: Option<String>,
}

impl CommandKey {
    /// Creates a top-level command key.
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            subcommand: None,
        }
    }

    /// Creates a two-level command key.
    pub fn with_subcommand(command: &str, subcommand: &str) -> Self {
        Self {
            command: command.to_string(),
            subcommand: Some(subcommand.to_string()),
        }
    }

    /// The command name.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The subcommand name, when present.
    pub fn subcommand(&self) -> Option<&str> {
        self.subcommand.as_deref()
    }

    /// True when the key addresses a subcommand.
    pub fn has_subcommand(&self) -> bool {
        self.subcommand.is_some()
    }
}

impl std::fmt::Display for CommandKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.subcommand {
            Some(sub) => write!(f, "{} {}", self.command, sub),
            None => write!(f, "{}", self.command),
        }
    }
}

impl FromStr for CommandKey {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let command = parts.next().ok_or(RegistryError::EmptyCommandName)?;
        let subcommand = parts.next();
        if parts.next().is_some() {
            return Err(RegistryError::NestingTooDeep(s.to_string()));
        }
        Ok(match subcommand {
            Some(sub) => Self::with_subcommand(command, sub),
            None => Self::new(command),
        })
    }
}

/// A registered command's executable entry point.
///
/// Implemented directly for command structs, or supplied as a plain function
/// or capturing closure through the blanket impl below.
pub trait CommandHandler {
    /// Runs the command to completion.
    fn run(&self) -> Result<(), HandlerError>;
}

impl<F> CommandHandler for F
where
    F: Fn() -> Result<(), HandlerError>,
{
    fn run(&self) -> Result<(), HandlerError> {
        (self)()
    }
}

/// One registered command: key, description, handler, and option schema.
pub struct CommandEntry {
    key: CommandKey,
    description: String,
    handler: Box<dyn CommandHandler>,
    options: OptionSchema,
}

impl CommandEntry {
    /// Creates an entry with an empty description and option schema.
    pub fn new(key: CommandKey, handler: impl CommandHandler + 'static) -> Self {
        Self {
            key,
            description: String::new(),
            handler: Box::new(handler),
            options: OptionSchema::new(),
        }
    }

    /// Sets the description shown in the global command list.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Replaces the option schema.
    pub fn with_options(mut self, options: OptionSchema) -> Self {
        self.options = options;
        self
    }

    /// The command key.
    pub fn key(&self) -> &CommandKey {
        &self.key
    }

    /// The description, possibly empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The option schema.
    pub fn options(&self) -> &OptionSchema {
        &self.options
    }

    /// The registered handler.
    pub fn handler(&self) -> &dyn CommandHandler {
        self.handler.as_ref()
    }
}

impl std::fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandEntry")
            .field("key", &self.key)
            .field("description", &self.description)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Mapping from command keys to entries, insertion order preserved.
///
/// Lookups are case-sensitive and exact. There is no removal operation; the
/// registry is static configuration.
///
/// # Examples
///
/// ```
/// use conroute_core::{CommandEntry, CommandKey, CommandRegistry, HandlerError};
///
/// fn noop() -> Result<(), HandlerError> {
///     Ok(())
/// }
///
/// let mut registry = CommandRegistry::new();
/// registry
///     .register(CommandEntry::new(CommandKey::new("build"), noop).with_description("Compile"))
///     .unwrap();
/// registry
///     .register(CommandEntry::new(
///         CommandKey::with_subcommand("cache", "clear"),
///         noop,
///     ))
///     .unwrap();
///
/// assert!(registry.lookup_key("build").is_some());
/// assert!(registry.lookup_key("Build").is_none());
/// assert!(registry.has_subcommands());
/// ```
#[derive(Debug, Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, validating its key and option schema.
    pub fn register(&mut self, entry: CommandEntry) -> Result<(), RegistryError> {
        let key = entry.key().to_string();
        validate_key(entry.key())?;
        validate_options(&key, entry.options())?;
        if self.index.contains_key(&key) {
            return Err(RegistryError::DuplicateCommand(key));
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Looks up an entry by structured key.
    pub fn lookup(&self, key: &CommandKey) -> Option<&CommandEntry> {
        self.lookup_key(&key.to_string())
    }

    /// Looks up an entry by its space-joined key string.
    pub fn lookup_key(&self, key: &str) -> Option<&CommandEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Iterates entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.iter()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when any registered key addresses a subcommand. Help rendering
    /// widens its option column to line up with two-level entries.
    pub fn has_subcommands(&self) -> bool {
        self.entries.iter().any(|e| e.key().has_subcommand())
    }
}

fn validate_key(key: &CommandKey) -> Result<(), RegistryError> {
    if key.command().trim().is_empty() {
        return Err(RegistryError::EmptyCommandName);
    }
    for part in std::iter::once(key.command()).chain(key.subcommand()) {
        if part.split_whitespace().count() > 1 {
            return Err(RegistryError::NestingTooDeep(key.to_string()));
        }
    }
    if let Some(sub) = key.subcommand() {
        if sub.trim().is_empty() {
            return Err(RegistryError::EmptyCommandName);
        }
    }
    Ok(())
}

fn validate_options(key: &str, options: &OptionSchema) -> Result<(), RegistryError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for option in options.iter() {
        if option.names.is_empty() {
            return Err(RegistryError::MissingAlias(key.to_string()));
        }
        for alias in &option.names {
            if alias.is_empty() || alias.starts_with('-') || alias.contains(char::is_whitespace) {
                return Err(RegistryError::InvalidAlias {
                    key: key.to_string(),
                    alias: alias.clone(),
                });
            }
            if !seen.insert(alias) {
                return Err(RegistryError::DuplicateAlias {
                    key: key.to_string(),
                    alias: alias.clone(),
                });
            }
        }
    }
    Ok(())
}
