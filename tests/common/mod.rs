use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Pipe `source` through the built binary and return what it prints.
pub fn format_via_cli(source: &str) -> Result<String> {
    let mut child = Command::new(assert_cmd::cargo::cargo_bin!("assignment_fixer"))
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .context("stdin not piped")?
        .write_all(source.as_bytes())?;
    let output = child.wait_with_output()?;

    anyhow::ensure!(output.status.success(), "assignment_fixer exited with {}", output.status);
    Ok(String::from_utf8(output.stdout)?)
}

/// Every `tests/fixtures/<case>/input.ts`, sorted by case name.
pub fn fixture_inputs() -> Vec<PathBuf> {
    let mut inputs: Vec<PathBuf> = glob::glob("tests/fixtures/*/input.ts")
        .unwrap()
        .map(Result::unwrap)
        .collect();
    inputs.sort();
    inputs
}
