//! Integration tests for the demo binary: dispatch branches, help output,
//! and error routing as seen from outside the process.

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_conroute"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("CONROUTE_DEBUG")
        .output()
        .expect("failed to run conroute")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_no_arguments_prints_global_help() {
    let output = run(&[]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Usage: conroute [OPTIONS] COMMAND [SUBCOMMAND] [opt...]"));
    assert!(out.contains("greet"));
    assert!(out.contains("service start"));
    assert!(out.contains("Run 'conroute COMMAND [SUBCOMMAND] --help'"));
}

#[test]
fn test_explicit_help_matches_implicit() {
    let implicit = run(&[]);
    let explicit = run(&["--help"]);
    assert_eq!(stdout(&implicit), stdout(&explicit));
}

#[test]
fn test_version_banner() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("conroute version"));
    assert!(out.contains("framework version"));
}

#[test]
fn test_unknown_global_flag() {
    let output = run(&["--bogus"]);
    assert!(!output.status.success());
    assert!(
        stdout(&output)
            .contains("flag provided but not defined: '--bogus', see 'conroute --help'.")
    );
}

#[test]
fn test_unknown_command() {
    let output = run(&["nope"]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("'nope' is not command, see 'conroute --help'."));
}

#[test]
fn test_greet_with_declared_flags() {
    let output = run(&["greet", "--name=World"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Hello, World!\n");
}

#[test]
fn test_greet_shout() {
    let output = run(&["greet", "-n=ops", "--shout"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "HELLO, OPS!\n");
}

#[test]
fn test_greet_rejects_undeclared_flag() {
    let output = run(&["greet", "--bogus"]);
    assert!(!output.status.success());
    assert!(
        stdout(&output)
            .contains("flag provided but not defined: '--bogus', see 'conroute greet --help'.")
    );
}

#[test]
fn test_command_help_lists_options() {
    let output = run(&["greet", "--help"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("Usage: conroute greet [opt...]"));
    assert!(out.contains("-n, --name"));
    assert!(out.contains("-s, --shout"));
}

#[test]
fn test_subcommand_dispatch_and_help() {
    let output = run(&["service", "start"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "service started\n");

    let output = run(&["service", "start", "--detach"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "service started in background\n");

    let output = run(&["service", "start", "--help"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("Usage: conroute service start [opt...]"));
    assert!(out.contains("-d, --detach"));
}

#[test]
fn test_handler_failure_is_logged_not_printed() {
    let output = run(&["fail"]);
    assert!(!output.status.success());
    // The message goes to the log sink on stderr, not the user terminal.
    assert!(!stdout(&output).contains("induced failure"));
    assert!(stderr(&output).contains("induced failure for log routing"));
}
