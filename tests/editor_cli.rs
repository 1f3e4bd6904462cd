//! The `editor` binary without a usable subcommand: usage only, no side effects.

use std::path::Path;
use std::process::{Command, Output, Stdio};

fn run_editor(workdir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_editor"))
        .args(args)
        .current_dir(workdir)
        .env("XDG_CONFIG_HOME", workdir.join("config"))
        .env("HOME", workdir)
        .stdin(Stdio::null())
        .output()
        .unwrap()
}

fn assert_usage_only(args: &[&str]) {
    let dir = tempfile::tempdir().unwrap();
    let out = run_editor(dir.path(), args);

    assert!(out.status.success(), "{args:?} exited with {}", out.status);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Flexible Gallery Manager"), "{stdout}");
    assert!(stdout.contains("editor add"));
    assert!(stdout.contains("editor remove"));
    assert!(stdout.contains("editor list"));

    assert!(!dir.path().join("data").exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn no_subcommand_prints_usage() {
    assert_usage_only(&[]);
}

#[test]
fn unknown_subcommand_prints_usage() {
    assert_usage_only(&["bogus"]);
}

#[test]
fn explicit_data_path_is_not_created_without_a_command() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("gallery.json");
    let out = run_editor(dir.path(), &["--data", data.to_str().unwrap(), "bogus"]);
    assert!(out.status.success());
    assert!(!data.exists());
}
