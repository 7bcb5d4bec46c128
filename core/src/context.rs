//! Application metadata passed explicitly into the dispatcher and classifier.

use serde::{Deserialize, Serialize};

/// Process-wide application metadata.
///
/// Constructed once at startup and passed by reference wherever it is needed.
/// There is deliberately no global instance; tests fabricate contexts freely.
///
/// # Examples
///
/// ```
/// use conroute_core::AppContext;
///
/// let ctx = AppContext::new("myapp", "1.2.0").with_debug(true);
/// assert_eq!(ctx.name, "myapp");
/// assert!(ctx.debug);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppContext {
    /// Application display name used in the version banner.
    pub name: String,
    /// Application version string.
    pub version: String,
    /// Enables verbose multi-line error reporting.
    pub debug: bool,
}

impl AppContext {
    /// Creates a context with debug reporting disabled.
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            debug: false,
        }
    }

    /// Sets the debug flag.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
