//! Help, usage, and version rendering.
//!
//! Pure formatting over registry and schema state: every function returns the
//! rendered text and touches nothing else, so rendering twice over an
//! unchanged registry yields byte-identical output.

use crate::FRAMEWORK_VERSION;
use crate::context::AppContext;
use crate::registry::CommandRegistry;

/// Renders the global usage text: usage line, global options, the command
/// list in registration order, and the footer hint.
///
/// When any registered key has a subcommand, the global options block gains
/// an extra tab so descriptions line up with two-level command entries.
pub fn render_global_help(registry: &CommandRegistry, script: &str) -> String {
    let tabs = if registry.has_subcommands() {
        "\t\t"
    } else {
        "\t"
    };

    let mut out = String::new();
    out.push_str(&format!(
        "Usage: {script} [OPTIONS] COMMAND [SUBCOMMAND] [opt...]\n"
    ));
    out.push('\n');
    out.push_str("Options:\n");
    out.push_str(&format!("  -h, --help{tabs}Print usage\n"));
    out.push_str(&format!("  -v, --version{tabs}Print version information\n"));
    out.push('\n');
    out.push_str("Commands:\n");
    for entry in registry.iter() {
        out.push_str(&format!("  {}\t{}\n", entry.key(), entry.description()));
    }
    out.push('\n');
    out.push_str(&format!(
        "Run '{script} COMMAND [SUBCOMMAND] --help' for more information on a command.\n"
    ));
    out
}

/// Renders usage for one resolved command key, with its option schema.
///
/// The options block is omitted entirely when the key is unregistered or its
/// schema is empty.
pub fn render_command_help(registry: &CommandRegistry, script: &str, key: &str) -> String {
    let mut out = format!("Usage: {script} {key} [opt...]\n");

    let Some(entry) = registry.lookup_key(key) else {
        return out;
    };
    if entry.options().is_empty() {
        return out;
    }

    out.push('\n');
    out.push_str("Options:\n");
    for option in entry.options().iter() {
        out.push_str(&format!(
            "  {}\t{}\n",
            option.flag_forms().join(", "),
            option.description
        ));
    }
    out
}

/// Renders the version banner.
pub fn render_version(context: &AppContext) -> String {
    format!(
        "{} version {}, framework version {}\n",
        context.name, context.version, FRAMEWORK_VERSION
    )
}
