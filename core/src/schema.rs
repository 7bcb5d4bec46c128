//! Option schema definitions for registered commands.
//!
//! Each command in the registry carries an [`OptionSchema`]: the ordered list
//! of flags the command accepts. The schema is pure data; validation against
//! supplied flags lives in [`crate::validate`] and rendering lives in
//! [`crate::help`].

use serde::{Deserialize, Serialize};

/// Renders a bare alias in its command-line form.
///
/// Single-character aliases become `-x`, longer aliases become `--xyz`.
///
/// # Examples
///
/// ```
/// use conroute_core::schema::flag_form;
///
/// assert_eq!(flag_form("f"), "-f");
/// assert_eq!(flag_form("force"), "--force");
/// ```
pub fn flag_form(alias: &str) -> String {
    if alias.chars().count() == 1 {
        format!("-{alias}")
    } else {
        format!("--{alias}")
    }
}

/// One declared flag of a command.
///
/// A definition holds one or more bare aliases (stored without dash prefixes)
/// and a free-text description. The first alias is conventionally the short
/// form, but any mix is allowed; ordering is preserved for help output.
///
/// # Examples
///
/// ```
/// use conroute_core::OptionDef;
///
/// let force = OptionDef::new(&["f", "force"]).with_description("Overwrite existing output");
/// assert_eq!(force.flag_forms(), vec!["-f".to_string(), "--force".to_string()]);
/// assert!(force.matches("--force"));
/// assert!(!force.matches("--quiet"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDef {
    /// Bare aliases, e.g. `["f", "force"]`.
    pub names: Vec<String>,
    /// Description shown in command help. May be empty.
    pub description: String,
}

impl OptionDef {
    /// Creates a definition from bare aliases.
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            description: String::new(),
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Returns every alias rendered with its `-`/`--` prefix.
    pub fn flag_forms(&self) -> Vec<String> {
        self.names.iter().map(|n| flag_form(n)).collect()
    }

    /// Checks whether a prefixed flag string refers to this definition.
    pub fn matches(&self, flag: &str) -> bool {
        self.names.iter().any(|n| flag_form(n) == flag)
    }
}

/// Ordered sequence of option definitions attached to one command.
///
/// # Examples
///
/// ```
/// use conroute_core::{OptionDef, OptionSchema};
///
/// let schema = OptionSchema::new()
///     .with_option(OptionDef::new(&["f", "force"]))
///     .with_option(OptionDef::new(&["o", "output"]).with_description("Output path"));
///
/// assert_eq!(schema.len(), 2);
/// assert!(schema.declares("--output"));
/// assert!(!schema.declares("--bogus"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSchema {
    options: Vec<OptionDef>,
}

impl OptionSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an option definition.
    pub fn with_option(mut self, option: OptionDef) -> Self {
        self.options.push(option);
        self
    }

    /// Iterates definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionDef> {
        self.options.iter()
    }

    /// Number of declared options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// True when no options are declared.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Every declared alias rendered with its prefix, in declaration order.
    pub fn declared_flags(&self) -> Vec<String> {
        self.options.iter().flat_map(|o| o.flag_forms()).collect()
    }

    /// Checks whether a prefixed flag string is declared anywhere in the schema.
    pub fn declares(&self, flag: &str) -> bool {
        self.options.iter().any(|o| o.matches(flag))
    }
}
