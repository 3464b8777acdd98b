//! Formatting many files at once.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Configuration;
use crate::grammar::Dialect;

/// Directories never descended into when expanding a directory argument.
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", "target"];

/// What happened to one file.
#[derive(Debug)]
pub enum Outcome {
    Unchanged,
    /// The formatted text differs from what is on disk.
    Changed(String),
    Failed(anyhow::Error),
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Expand files, directories and glob patterns into the list of files to format.
///
/// Plain files are taken as given. Directories are walked recursively and glob
/// patterns expanded; from both only supported extensions are kept.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            out.push(path.to_path_buf());
        } else if path.is_dir() {
            walk(path, &mut out)?;
        } else {
            let mut matched = false;
            for entry in glob::glob(input).with_context(|| format!("bad glob pattern {input}"))? {
                let p = entry?;
                if p.is_file() && Dialect::from_path(&p).is_some() {
                    out.push(p);
                    matched = true;
                }
            }
            if !matched {
                anyhow::bail!("no such file or pattern: {input}");
            }
        }
    }
    out.sort();
    out.dedup();
    Ok(out)
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))?;
    for entry in entries {
        let p = entry?.path();
        if p.is_dir() {
            let skipped = p
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| SKIPPED_DIRS.contains(&n));
            if !skipped {
                walk(&p, out)?;
            }
        } else if Dialect::from_path(&p).is_some() {
            out.push(p);
        }
    }
    Ok(())
}

/// Format one file without touching it on disk.
pub fn format_file(path: &Path, dialect: Option<Dialect>, config: &Configuration) -> Outcome {
    let dialect = dialect
        .or_else(|| Dialect::from_path(path))
        .unwrap_or_default();
    let src = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => return Outcome::Failed(anyhow::Error::new(e).context(path.display().to_string())),
    };
    match crate::format_text(&src, dialect, config) {
        Ok(Some(out)) => Outcome::Changed(out),
        Ok(None) => Outcome::Unchanged,
        Err(e) => Outcome::Failed(e.context(path.display().to_string())),
    }
}

/// Format every path in parallel. Reports come back in input order.
pub fn format_files(
    paths: &[PathBuf],
    dialect: Option<Dialect>,
    config: &Configuration,
) -> Vec<FileReport> {
    paths
        .par_iter()
        .map(|path| {
            let outcome = format_file(path, dialect, config);
            tracing::debug!(path = %path.display(), changed = matches!(outcome, Outcome::Changed(_)), "formatted");
            FileReport {
                path: path.clone(),
                outcome,
            }
        })
        .collect()
}

/// Write back every changed file. Returns how many were written.
pub fn write_changed(reports: &[FileReport]) -> Result<usize> {
    let mut written = 0;
    for report in reports {
        if let Outcome::Changed(text) = &report.outcome {
            fs::write(&report.path, text)
                .with_context(|| format!("writing {}", report.path.display()))?;
            tracing::info!(path = %report.path.display(), "rewrote file");
            written += 1;
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn directories_keep_only_script_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.ts"), "const a = 1;\n").unwrap();
        fs::write(dir.path().join("b.md"), "# notes\n").unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules/c.js"), "var c = 1;\n").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/d.tsx"), "const d = <b />;\n").unwrap();

        let found = expand_inputs(&[dir.path().display().to_string()]).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("a.ts"), PathBuf::from("nested/d.tsx")]
        );
    }

    #[test]
    fn reports_changed_and_unchanged_files() {
        let dir = tempfile::tempdir().unwrap();
        let tidy = dir.path().join("tidy.ts");
        let messy = dir.path().join("messy.ts");
        fs::write(&tidy, "const a = 1;\n").unwrap();
        fs::write(&messy, "const a\n  = 1;\n").unwrap();

        let reports = format_files(&[tidy, messy.clone()], None, &Configuration::default());
        assert!(matches!(reports[0].outcome, Outcome::Unchanged));
        match &reports[1].outcome {
            Outcome::Changed(text) => assert_eq!(text, "const a = 1;\n"),
            other => panic!("expected a change, got {other:?}"),
        }

        assert_eq!(write_changed(&reports).unwrap(), 1);
        assert_eq!(fs::read_to_string(messy).unwrap(), "const a = 1;\n");
    }

    #[test]
    fn missing_input_is_an_error() {
        assert!(expand_inputs(&["does/not/exist.ts".to_string()]).is_err());
    }
}
