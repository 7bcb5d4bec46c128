//! Failure taxonomy for dispatch and handler execution.
//!
//! Two tracks exist deliberately. [`DispatchError::NotFound`] covers user
//! input mistakes; its message is printed to the terminal and never logged.
//! Everything else is an application fault routed through the
//! [`ErrorClassifier`](crate::ErrorClassifier) to a log sink.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::RegistryError;

/// File and line where a failure originated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A failure raised inside a command handler.
///
/// Carries the numeric code used for severity mapping, a category label, and
/// the capture point of the failure. Constructors are `#[track_caller]` so the
/// recorded location is the handler's call site, not this module.
///
/// # Examples
///
/// ```
/// use conroute_core::HandlerError;
///
/// let err = HandlerError::new(2, "cache directory unreadable").with_kind("io");
/// assert_eq!(err.code, 2);
/// assert_eq!(err.kind, "io");
/// assert!(err.location.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HandlerError {
    /// Numeric failure code, mapped to a log severity by the classifier.
    pub code: i64,
    /// Human-readable failure message.
    pub message: String,
    /// Concrete failure category label (e.g. `"io"`, `"handler"`).
    pub kind: String,
    /// Where the failure was raised, when known.
    pub location: Option<SourceLocation>,
    /// Optional backtrace or context text.
    pub trace: Option<String>,
}

impl HandlerError {
    /// Creates a handler failure, capturing the caller's file and line.
    #[track_caller]
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            code,
            message: message.into(),
            kind: "handler".to_string(),
            location: Some(SourceLocation {
                file: caller.file().to_string(),
                line: caller.line(),
            }),
            trace: None,
        }
    }

    /// Sets the failure category label.
    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    /// Attaches trace text.
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }
}

/// Terminal failure of one dispatch invocation.
///
/// The dispatcher never retries; each variant ends the current invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// User input mistake: unknown flag or unknown command. The message is
    /// fully formatted and already carries the `--help` hint.
    #[error("{0}")]
    NotFound(String),

    /// Registry or handler wiring defect. A deployment bug, not user input.
    #[error("{0}")]
    Configuration(String),

    /// Uncaught failure from handler execution.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl DispatchError {
    /// True for expected user-facing failures that are printed, not logged.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<RegistryError> for DispatchError {
    fn from(err: RegistryError) -> Self {
        Self::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_captures_call_site() {
        let err = HandlerError::new(1, "boom");
        let location = err.location.expect("location captured");
        assert!(location.file.ends_with("error.rs"));
        assert!(location.line > 0);
    }

    #[test]
    fn test_handler_error_builder() {
        let err = HandlerError::new(4, "disk full")
            .with_kind("io")
            .with_trace("write_output\nflush");
        assert_eq!(err.kind, "io");
        assert_eq!(err.trace.as_deref(), Some("write_output\nflush"));
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn test_not_found_classification() {
        let err = DispatchError::NotFound("'x' is not command".to_string());
        assert!(err.is_not_found());
        assert!(!DispatchError::Configuration("bad".into()).is_not_found());
    }

    #[test]
    fn test_registry_error_becomes_configuration() {
        let err: DispatchError = RegistryError::DuplicateCommand("build".to_string()).into();
        assert!(matches!(err, DispatchError::Configuration(_)));
    }
}
