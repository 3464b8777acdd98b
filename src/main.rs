#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![warn(clippy::nursery)]

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use owo_colors::{OwoColorize, Stream};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use assignment_fixer::batch::{self, Outcome};
use assignment_fixer::config;
use assignment_fixer::{Configuration, Dialect, IndentStyle, TieBreak, format_source_with};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IndentMode {
    Tabs,
    Spaces,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DialectArg {
    Ts,
    Tsx,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TieBreakArg {
    Inline,
    Wrapped,
}

#[derive(Parser, Debug)]
#[command(name = "assignment-fixer", version)]
struct Args {
    /// Files, directories or glob patterns. Reads stdin when empty.
    paths: Vec<String>,

    /// Rewrite files in place.
    #[arg(long, conflicts_with = "check")]
    write: bool,

    /// List files that would change and exit with status 1 if any would.
    #[arg(long)]
    check: bool,

    /// JSON configuration file (dprint.json layout).
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    line_width: Option<usize>,

    #[arg(long, value_enum)]
    indent_mode: Option<IndentMode>,

    #[arg(long)]
    indent_width: Option<usize>,

    /// Break over-long initializers onto the next line without parentheses.
    #[arg(long)]
    no_wrap: bool,

    #[arg(long, value_enum)]
    tie_break: Option<TieBreakArg>,

    /// Grammar to use instead of guessing from the file extension.
    #[arg(long, value_enum)]
    dialect: Option<DialectArg>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}

fn configuration(args: &Args) -> Result<Configuration> {
    let mut cfg = Configuration::default();
    if let Some(path) = &args.config {
        let resolved = config::load(path, cfg)?;
        for d in &resolved.diagnostics {
            tracing::warn!(diagnostic = %d, "configuration");
        }
        cfg = resolved.config;
    }

    if let Some(w) = args.line_width {
        cfg.line_width = w;
    }
    match (args.indent_mode, args.indent_width) {
        (Some(IndentMode::Tabs), _) => cfg.indent_style = IndentStyle::Tabs,
        (Some(IndentMode::Spaces) | None, Some(width)) => {
            cfg.indent_style = IndentStyle::Spaces { width };
        }
        (Some(IndentMode::Spaces), None) => {
            if cfg.indent_style == IndentStyle::Tabs {
                cfg.indent_style = IndentStyle::Spaces { width: 2 };
            }
        }
        (None, None) => {}
    }
    if args.no_wrap {
        cfg.wrap_long_assignments = false;
    }
    if let Some(t) = args.tie_break {
        cfg.tie_break = match t {
            TieBreakArg::Inline => TieBreak::Inline,
            TieBreakArg::Wrapped => TieBreak::Wrapped,
        };
    }
    Ok(cfg)
}

fn run_stdin(args: &Args, cfg: &Configuration, dialect: Option<Dialect>) -> Result<ExitCode> {
    let mut src = String::new();
    io::stdin()
        .read_to_string(&mut src)
        .context("reading stdin")?;
    let out = format_source_with(&src, dialect.unwrap_or_default(), cfg)?;
    if args.check {
        return Ok(if out == src {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }
    io::stdout().write_all(out.as_bytes())?;
    Ok(ExitCode::SUCCESS)
}

fn run(args: &Args) -> Result<ExitCode> {
    let cfg = configuration(args)?;
    let dialect = args.dialect.map(|d| match d {
        DialectArg::Ts => Dialect::TypeScript,
        DialectArg::Tsx => Dialect::Tsx,
    });

    if args.paths.is_empty() {
        return run_stdin(args, &cfg, dialect);
    }

    let paths = batch::expand_inputs(&args.paths)?;
    let reports = batch::format_files(&paths, dialect, &cfg);

    let mut failed = false;
    for report in &reports {
        if let Outcome::Failed(e) = &report.outcome {
            eprintln!(
                "{}: {e:#}",
                "error".if_supports_color(Stream::Stderr, |s| s.red())
            );
            failed = true;
        }
    }

    let mut would_change = false;
    if args.check {
        for report in &reports {
            if matches!(report.outcome, Outcome::Changed(_)) {
                would_change = true;
                println!(
                    "{} {}",
                    "would reformat".if_supports_color(Stream::Stdout, |s| s.yellow()),
                    report.path.display()
                );
            }
        }
    } else if args.write {
        batch::write_changed(&reports)?;
    } else {
        let mut stdout = io::stdout().lock();
        for report in &reports {
            match &report.outcome {
                Outcome::Changed(text) => stdout.write_all(text.as_bytes())?,
                Outcome::Unchanged => {
                    let text = std::fs::read_to_string(&report.path)?;
                    stdout.write_all(text.as_bytes())?;
                }
                Outcome::Failed(_) => {}
            }
        }
    }

    Ok(if failed {
        ExitCode::from(2)
    } else if would_change {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!(
                "{}: {e:#}",
                "error".if_supports_color(Stream::Stderr, |s| s.red())
            );
            ExitCode::from(2)
        }
    }
}
