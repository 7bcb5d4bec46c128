//! Argument scanning: `argv` tokens to a parsed [`Invocation`].
//!
//! The engine core consumes already-parsed invocations; this module is the
//! concrete producer for the `conroute` binary. The first two non-flag tokens
//! become the command and subcommand; tokens starting with a dash are flags,
//! with an optional inline `=value`. Positional tokens beyond the subcommand
//! are not bound and are ignored.

use std::path::Path;

use conroute_core::{FlagValue, Invocation};

/// Scans an argv iterator, using the first element as the script path.
pub fn scan<I>(argv: I) -> Invocation
where
    I: IntoIterator<Item = String>,
{
    let mut argv = argv.into_iter();
    let script = argv.next().map(|p| display_name(&p)).unwrap_or_default();

    let mut invocation = Invocation::new(&script);
    let mut positionals = 0usize;

    for token in argv {
        if is_flag(&token) {
            invocation = match token.split_once('=') {
                Some((flag, value)) => {
                    invocation.with_flag(flag, FlagValue::Value(value.to_string()))
                }
                None => invocation.with_flag(&token, FlagValue::Present),
            };
        } else {
            match positionals {
                0 => invocation = invocation.with_command(&token),
                1 => invocation = invocation.with_sub_command(&token),
                _ => {}
            }
            positionals += 1;
        }
    }
    invocation
}

fn is_flag(token: &str) -> bool {
    token.starts_with('-') && token != "-" && token != "--"
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
