//! Error classification and routing.
//!
//! The classifier sits at the catch boundary around dispatch. Expected
//! user-facing failures ([`DispatchError::NotFound`]) are printed to the
//! terminal and kept out of operational logs. Every other failure becomes an
//! [`ErrorRecord`] and is handed to a [`LogSink`] at the severity the
//! configured [`SeverityMap`] assigns to its numeric code.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::{DispatchError, HandlerError};

/// Log severity levels exposed by the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Notice,
}

/// Configured mapping from numeric failure codes to severities.
///
/// # Examples
///
/// ```
/// use conroute_core::{Severity, SeverityMap};
///
/// let map = SeverityMap::new()
///     .assign(1, Severity::Error)
///     .assign(2, Severity::Warning)
///     .assign(8, Severity::Notice);
///
/// assert_eq!(map.classify(2), Some(Severity::Warning));
/// assert_eq!(map.classify(99), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SeverityMap {
    entries: HashMap<i64, Severity>,
}

impl SeverityMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a severity to a code.
    pub fn assign(mut self, code: i64, severity: Severity) -> Self {
        self.entries.insert(code, severity);
        self
    }

    /// Looks up the severity for a code.
    pub fn classify(&self, code: i64) -> Option<Severity> {
        self.entries.get(&code).copied()
    }
}

/// Snapshot of one classified failure, built at the catch boundary and
/// consumed immediately by the sink or the terminal. Never persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub code: i64,
    pub message: String,
    /// Concrete failure category label.
    pub kind: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub trace: Option<String>,
}

impl ErrorRecord {
    fn from_handler(err: &HandlerError) -> Self {
        Self {
            code: err.code,
            message: err.message.clone(),
            kind: err.kind.clone(),
            file: err.location.as_ref().map(|l| l.file.clone()),
            line: err.location.as_ref().map(|l| l.line),
            trace: err.trace.clone(),
        }
    }

    fn from_configuration(message: &str) -> Self {
        Self {
            code: 0,
            message: message.to_string(),
            kind: "configuration".to_string(),
            file: None,
            line: None,
            trace: None,
        }
    }

    /// Verbose multi-line form used in debug mode.
    pub fn verbose_message(&self) -> String {
        format!(
            "{}\n[code] {} [type] {}\n[file] {} [line] {}\n[trace] {}",
            self.message,
            self.code,
            self.kind,
            self.file.as_deref().unwrap_or("<unknown>"),
            self.line.unwrap_or(0),
            self.trace.as_deref().unwrap_or("<none>"),
        )
    }

    /// Compact single-line form used outside debug mode.
    pub fn compact_message(&self) -> String {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => format!(
                "{} [{}] {} in {} line {}",
                self.message, self.code, self.kind, file, line
            ),
            _ => format!("{} [{}] {}", self.message, self.code, self.kind),
        }
    }
}

/// Leveled logging boundary. Implementations decide persistence; this core
/// only hands over the formatted message and the record.
pub trait LogSink {
    fn error(&self, message: &str, record: &ErrorRecord);
    fn warning(&self, message: &str, record: &ErrorRecord);
    fn notice(&self, message: &str, record: &ErrorRecord);
}

/// Default sink forwarding to the `tracing` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn error(&self, message: &str, record: &ErrorRecord) {
        tracing::error!(code = record.code, kind = %record.kind, "{message}");
    }

    fn warning(&self, message: &str, record: &ErrorRecord) {
        tracing::warn!(code = record.code, kind = %record.kind, "{message}");
    }

    fn notice(&self, message: &str, record: &ErrorRecord) {
        tracing::info!(code = record.code, kind = %record.kind, "{message}");
    }
}

/// Routes dispatch failures to the terminal or the log sink.
pub struct ErrorClassifier<'a> {
    context: &'a AppContext,
    severity_map: SeverityMap,
    sink: &'a dyn LogSink,
}

impl<'a> ErrorClassifier<'a> {
    /// Creates a classifier over the given context, mapping, and sink.
    pub fn new(context: &'a AppContext, severity_map: SeverityMap, sink: &'a dyn LogSink) -> Self {
        Self {
            context,
            severity_map,
            sink,
        }
    }

    /// Builds the record for a non-NotFound failure.
    pub fn classify(&self, err: &DispatchError) -> Option<ErrorRecord> {
        match err {
            DispatchError::NotFound(_) => None,
            DispatchError::Configuration(message) => Some(ErrorRecord::from_configuration(message)),
            DispatchError::Handler(handler) => Some(ErrorRecord::from_handler(handler)),
        }
    }

    /// Routes one terminal failure.
    ///
    /// NotFound messages go straight to the terminal and never reach the
    /// sink. Anything else is logged at the mapped severity. Codes the map
    /// does not know are logged at [`Severity::Error`] rather than dropped;
    /// see DESIGN.md for the reasoning behind that fallback.
    pub fn handle(&self, err: &DispatchError) {
        let Some(record) = self.classify(err) else {
            println!("{err}");
            return;
        };

        let message = if self.context.debug {
            record.verbose_message()
        } else {
            record.compact_message()
        };

        match self
            .severity_map
            .classify(record.code)
            .unwrap_or(Severity::Error)
        {
            Severity::Error => self.sink.error(&message, &record),
            Severity::Warning => self.sink.warning(&message, &record),
            Severity::Notice => self.sink.notice(&message, &record),
        }
    }
}
