#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![warn(clippy::nursery)]

pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod layout;
pub mod rules;

use anyhow::Result;

pub use config::{Configuration, TieBreak};
pub use engine::IndentStyle;
pub use error::{LayoutError, SourcePosition};
pub use grammar::Dialect;

pub fn format_source_with(src: &str, dialect: Dialect, config: &Configuration) -> Result<String> {
    let mut cx = engine::Ctx::new(src.to_string(), dialect, config.clone())?;
    rules::run_all(&mut cx)?;
    Ok(cx.to_string())
}

/// Format TypeScript source with the default configuration.
pub fn format_source(src: &str) -> Result<String> {
    format_source_with(src, Dialect::TypeScript, &Configuration::default())
}

/// Like [`format_source_with`], but `None` when nothing changed.
pub fn format_text(src: &str, dialect: Dialect, config: &Configuration) -> Result<Option<String>> {
    let out = format_source_with(src, dialect, config)?;
    Ok((out != src).then_some(out))
}
