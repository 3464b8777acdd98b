pub mod ast;

use anyhow::{Context, Result};
use ropey::Rope;
use std::fmt;
use tree_sitter::{Parser, Tree};

use crate::config::Configuration;
use crate::grammar::Dialect;

#[derive(Clone, Debug)]
pub struct TextEdit {
    pub start_byte: usize,
    pub end_byte: usize,
    pub replacement: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndentStyle {
    Tabs,
    Spaces { width: usize },
}

pub struct Ctx {
    rope: Rope,
    parser: Parser,
    pub tree: Tree,
    pub config: Configuration,
}

impl fmt::Display for Ctx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rope.to_string())
    }
}

impl Ctx {
    pub fn new(src: String, dialect: Dialect, config: Configuration) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&dialect.language())
            .context("set_language failed")?;
        let tree = parser.parse(src.as_str(), None).context("parse failed")?;
        Ok(Self {
            rope: Rope::from_str(&src),
            parser,
            tree,
            config,
        })
    }

    pub fn source(&self) -> String {
        self.rope.to_string()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.rope.to_string().into_bytes()
    }

    /// Apply non-overlapping edits and reparse. When two edits overlap the one
    /// that starts first wins and the other is dropped.
    pub fn apply_edits(&mut self, mut edits: Vec<TextEdit>) -> Result<()> {
        if edits.is_empty() {
            return Ok(());
        }
        edits.sort_by_key(|e| e.start_byte);
        let mut kept: Vec<TextEdit> = Vec::with_capacity(edits.len());
        for e in edits {
            if let Some(last) = kept.last()
                && e.start_byte < last.end_byte
            {
                tracing::debug!(start = e.start_byte, "dropping overlapping edit");
                continue;
            }
            kept.push(e);
        }
        for e in kept.into_iter().rev() {
            let start_char = self.rope.byte_to_char(e.start_byte);
            let end_char = self.rope.byte_to_char(e.end_byte);
            self.rope.remove(start_char..end_char);
            if !e.replacement.is_empty() {
                self.rope.insert(start_char, &e.replacement);
            }
        }
        self.tree = self
            .parser
            .parse(self.rope.to_string(), None)
            .context("reparse failed")?;
        Ok(())
    }
}
