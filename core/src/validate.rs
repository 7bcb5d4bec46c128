//! Supplied-flag validation against a command's option schema.
//!
//! Validation runs only after a successful registry lookup; the dispatcher
//! reports unknown commands before any flag is examined. The policy is fail
//! fast: the first undeclared flag in supply order stops validation, so the
//! caller gets exactly one actionable message per attempt.

use std::collections::HashSet;

use thiserror::Error;

use crate::invocation::Invocation;
use crate::registry::CommandEntry;

/// A supplied flag that the command's schema does not declare.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("flag provided but not defined: '{flag}'")]
pub struct UnknownFlag {
    /// The offending flag in its prefixed form.
    pub flag: String,
}

/// Verifies every supplied flag is declared by the entry's option schema.
///
/// Fails with the first undeclared flag in the invocation's supply order.
///
/// # Examples
///
/// ```
/// use conroute_core::{
///     CommandEntry, CommandKey, FlagValue, HandlerError, Invocation, OptionDef, OptionSchema,
///     validate_flags,
/// };
///
/// fn noop() -> Result<(), HandlerError> {
///     Ok(())
/// }
///
/// let entry = CommandEntry::new(CommandKey::new("build"), noop)
///     .with_options(OptionSchema::new().with_option(OptionDef::new(&["f", "force"])));
///
/// let ok = Invocation::new("app").with_flag("--force", FlagValue::Present);
/// assert!(validate_flags(&entry, &ok).is_ok());
///
/// let bad = Invocation::new("app").with_flag("--bogus", FlagValue::Present);
/// assert_eq!(validate_flags(&entry, &bad).unwrap_err().flag, "--bogus");
/// ```
pub fn validate_flags(entry: &CommandEntry, invocation: &Invocation) -> Result<(), UnknownFlag> {
    let declared: Vec<String> = entry.options().declared_flags();
    let declared: HashSet<&str> = declared.iter().map(String::as_str).collect();

    for (flag, _) in invocation.options() {
        if !declared.contains(flag.as_str()) {
            return Err(UnknownFlag { flag: flag.clone() });
        }
    }
    Ok(())
}
