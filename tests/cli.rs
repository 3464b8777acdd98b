use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("assignment_fixer"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn formats_stdin_to_stdout() {
    cli()
        .write_stdin("const a\n=\n1;\n")
        .assert()
        .success()
        .stdout("const a = 1;\n");
}

#[test]
fn line_width_flag_applies() {
    cli()
        .args(["--line-width", "20"])
        .write_stdin("const value\n=\nsomeLongIdentifier;\n")
        .assert()
        .success()
        .stdout("const value =\n  (someLongIdentifier);\n");
}

#[test]
fn no_wrap_flag_drops_parentheses() {
    cli()
        .args(["--line-width", "20", "--no-wrap"])
        .write_stdin("const value\n=\nsomeLongIdentifier;\n")
        .assert()
        .success()
        .stdout("const value =\n  someLongIdentifier;\n");
}

#[test]
fn check_reports_files_that_would_change() {
    let dir = tempfile::tempdir().unwrap();
    let messy = dir.path().join("messy.ts");
    let tidy = dir.path().join("tidy.ts");
    fs::write(&messy, "const a\n=\n1;\n").unwrap();
    fs::write(&tidy, "const b = 2;\n").unwrap();

    cli()
        .arg("--check")
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("messy.ts"))
        .stdout(predicate::str::contains("tidy.ts").not());

    assert_eq!(fs::read_to_string(&messy).unwrap(), "const a\n=\n1;\n");
}

#[test]
fn check_passes_on_tidy_files() {
    let dir = tempfile::tempdir().unwrap();
    let tidy = dir.path().join("tidy.ts");
    fs::write(&tidy, "const b = 2;\n").unwrap();

    cli().arg("--check").arg(&tidy).assert().success();
}

#[test]
fn write_rewrites_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("input.js");
    fs::write(&file, "let total\n=\ncount;\n").unwrap();

    cli().arg("--write").arg(&file).assert().success();
    assert_eq!(fs::read_to_string(&file).unwrap(), "let total = count;\n");
}

#[test]
fn config_file_is_read_and_unknown_keys_warned() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("dprint.json");
    fs::write(
        &config,
        r#"{ "lineWidth": 20, "assignmentFixer": { "wrapLongAssignments": false, "colour": true } }"#,
    )
    .unwrap();

    cli()
        .arg("--config")
        .arg(&config)
        .write_stdin("const value\n=\nsomeLongIdentifier;\n")
        .assert()
        .success()
        .stdout("const value =\n  someLongIdentifier;\n")
        .stderr(predicate::str::contains("unknown property"));
}

#[test]
fn missing_path_is_a_hard_error() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .arg(dir.path().join("nope.ts"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nope.ts"));
}
