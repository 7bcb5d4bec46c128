//! Parsed invocation: the dispatcher's view of one process invocation.
//!
//! Token scanning of `argv` happens outside this crate; the producer hands
//! over an [`Invocation`] with the script name, resolved command and
//! subcommand tokens, and an ordered map of supplied flags already normalized
//! to their `-x`/`--xyz` forms. The `conroute` binary ships one such scanner;
//! tests construct invocations directly through the builder methods.

use serde::{Deserialize, Serialize};

use crate::schema::flag_form;

/// Presence or value of one supplied flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagValue {
    /// Flag was supplied without a value (`--force`).
    Present,
    /// Flag was supplied with an inline value (`--output=dist`).
    Value(String),
}

impl FlagValue {
    /// Boolean reading of the flag: present counts as true unless the inline
    /// value spells a falsy literal.
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Present => true,
            Self::Value(v) => !matches!(v.as_str(), "false" | "0"),
        }
    }

    /// String reading of the flag, when a value was supplied.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Present => None,
            Self::Value(v) => Some(v),
        }
    }
}

/// One parsed process invocation.
///
/// # Examples
///
/// ```
/// use conroute_core::{FlagValue, Invocation};
///
/// let inv = Invocation::new("app")
///     .with_command("service")
///     .with_sub_command("start")
///     .with_flag("--detach", FlagValue::Present);
///
/// assert_eq!(inv.key(), "service start");
/// assert!(inv.bool_flag(&["d", "detach"], false));
/// assert!(!inv.bool_flag(&["q", "quiet"], false));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    script: String,
    command: String,
    sub_command: String,
    options: Vec<(String, FlagValue)>,
}

impl Invocation {
    /// Creates an invocation with no command, subcommand, or flags.
    pub fn new(script: &str) -> Self {
        Self {
            script: script.to_string(),
            ..Self::default()
        }
    }

    /// Sets the resolved command token.
    pub fn with_command(mut self, command: &str) -> Self {
        self.command = command.to_string();
        self
    }

    /// Sets the resolved subcommand token.
    pub fn with_sub_command(mut self, sub_command: &str) -> Self {
        self.sub_command = sub_command.to_string();
        self
    }

    /// Appends a supplied flag. `flag` must already carry its `-`/`--` prefix.
    pub fn with_flag(mut self, flag: &str, value: FlagValue) -> Self {
        self.options.push((flag.to_string(), value));
        self
    }

    /// The invoking program's display name.
    pub fn script(&self) -> &str {
        &self.script
    }

    /// The resolved command token, possibly empty.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The resolved subcommand token, possibly empty.
    pub fn sub_command(&self) -> &str {
        &self.sub_command
    }

    /// Supplied flags in the order the producer saw them.
    pub fn options(&self) -> &[(String, FlagValue)] {
        &self.options
    }

    /// Joins command and subcommand with one space and trims the result.
    pub fn key(&self) -> String {
        format!("{} {}", self.command, self.sub_command)
            .trim()
            .to_string()
    }

    /// Boolean accessor over bare aliases, used for help/version detection.
    ///
    /// Each alias is rendered to its prefixed form before matching; the first
    /// supplied match wins, otherwise `default` is returned.
    pub fn bool_flag(&self, aliases: &[&str], default: bool) -> bool {
        for alias in aliases {
            let form = flag_form(alias);
            if let Some((_, value)) = self.options.iter().find(|(flag, _)| *flag == form) {
                return value.as_bool();
            }
        }
        default
    }
}
