use std::ops::Range;

use crate::config::{Configuration, TieBreak};
use crate::error::SourcePosition;

/// Statement punctuation that follows an assignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Terminator {
    Semicolon,
    Comma,
    #[default]
    None,
}

impl Terminator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::None => "",
        }
    }

    #[must_use]
    pub const fn width(self) -> usize {
        self.as_str().len()
    }
}

/// What kind of expression an initializer is, as far as wrapping cares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shape {
    #[default]
    Simple,
    Call,
    Template,
    Parenthesized,
}

/// Whitespace that separated a token from the one before it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gap {
    /// Horizontal whitespace, kept as written.
    Inline(String),
    /// Whitespace containing a line break.
    Break,
}

/// One token of a flattened expression. Strings, templates, regexes and
/// comments are single tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaf {
    pub text: String,
    pub kind: &'static str,
    pub parent: &'static str,
    pub gap: Gap,
}

impl Leaf {
    pub fn new(text: impl Into<String>, kind: &'static str, parent: &'static str, gap: Gap) -> Self {
        Self {
            text: text.into(),
            kind,
            parent,
            gap,
        }
    }
}

/// A target or initializer as the host parsed it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    leaves: Vec<Leaf>,
    verbatim: String,
    shape: Shape,
    preserve: bool,
    malformed: bool,
}

impl Expr {
    pub fn new(leaves: Vec<Leaf>, verbatim: impl Into<String>, shape: Shape) -> Self {
        Self {
            leaves,
            verbatim: verbatim.into(),
            shape,
            preserve: false,
            malformed: false,
        }
    }

    /// Single-token expression.
    pub fn atom(text: &str) -> Self {
        Self::new(
            vec![Leaf::new(text, "identifier", "", Gap::Inline(String::new()))],
            text,
            Shape::Simple,
        )
    }

    #[must_use]
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Mark the expression as carrying multi-line structure that must not be collapsed.
    #[must_use]
    pub fn preserved(mut self, preserve: bool) -> Self {
        self.preserve = preserve;
        self
    }

    #[must_use]
    pub fn malformed(mut self, malformed: bool) -> Self {
        self.malformed = malformed;
        self
    }

    pub const fn shape(&self) -> Shape {
        self.shape
    }

    pub const fn is_preserved(&self) -> bool {
        self.preserve
    }

    /// Source text exactly as written, or `None` for a malformed expression.
    pub fn verbatim(&self) -> Option<&str> {
        (!self.malformed && !self.verbatim.is_empty()).then_some(self.verbatim.as_str())
    }

    /// The expression joined onto one line. Line breaks between tokens become a
    /// single space or nothing, depending on the tokens either side.
    pub fn one_line(&self) -> Option<String> {
        if self.malformed || self.leaves.is_empty() {
            return None;
        }
        let mut out = String::with_capacity(self.verbatim.len());
        let mut prev: Option<&Leaf> = None;
        for leaf in &self.leaves {
            if let Some(p) = prev {
                match &leaf.gap {
                    Gap::Inline(ws) => out.push_str(ws),
                    Gap::Break => out.push_str(joiner(p, leaf)),
                }
            }
            out.push_str(&leaf.text);
            prev = Some(leaf);
        }
        Some(out)
    }
}

const TIGHT_AFTER: &[&str] = &["(", "[", ".", "?.", "..."];
const TIGHT_BEFORE: &[&str] = &[")", "]", ",", ";", ".", "?."];

fn joiner(prev: &Leaf, next: &Leaf) -> &'static str {
    if TIGHT_AFTER.contains(&prev.text.as_str()) || TIGHT_BEFORE.contains(&next.text.as_str()) {
        return "";
    }
    match (next.text.as_str(), next.parent) {
        (":", "pair" | "pair_pattern" | "type_annotation") | ("(", "arguments") => "",
        _ => " ",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub target: Expr,
    pub initializer: Option<Expr>,
}

impl Binding {
    pub const fn new(target: Expr, initializer: Option<Expr>) -> Self {
        Self {
            target,
            initializer,
        }
    }
}

/// Assignment-like constructs the engine lays out. Each variant carries only
/// the fields it needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssignmentKind {
    /// `const name = value`, including destructuring declarations.
    Declaration { keyword: String, binding: Binding },
    /// `let a = 1, b = 2`. `stacked` is set when the source put each
    /// declarator on its own line.
    Compound {
        keyword: String,
        declarators: Vec<Binding>,
        stacked: bool,
    },
    /// Declaration in the initializer clause of a `for` header.
    ForInit {
        keyword: String,
        declarators: Vec<Binding>,
    },
    ClassField(Binding),
    /// Assignment statement to an existing name or property (`this.prop = value`).
    Reassignment(Binding),
    /// Pattern assignment without a declaration keyword: `({ x, y } = point)`.
    DestructuringStandalone(Binding),
}

impl AssignmentKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Declaration { .. } => "declaration",
            Self::Compound { .. } => "compound",
            Self::ForInit { .. } => "for-init",
            Self::ClassField(_) => "class-field",
            Self::Reassignment(_) => "reassignment",
            Self::DestructuringStandalone(_) => "destructuring",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignmentNode {
    pub kind: AssignmentKind,
    pub position: SourcePosition,
    /// Byte range in the source that the rendered text replaces.
    pub span: Range<usize>,
    /// Column (in characters) where the span starts.
    pub column: usize,
    /// Leading whitespace of the line the span starts on.
    pub line_indent: String,
    pub terminator: Terminator,
}

impl AssignmentNode {
    /// A node starting at column zero of an unindented line.
    pub fn at_line_start(kind: AssignmentKind, terminator: Terminator) -> Self {
        Self {
            kind,
            position: SourcePosition { line: 1, column: 1 },
            span: 0..0,
            column: 0,
            line_indent: String::new(),
            terminator,
        }
    }

    #[must_use]
    pub fn indented(mut self, line_indent: &str) -> Self {
        self.column = line_indent.chars().count();
        self.line_indent = line_indent.to_string();
        self
    }
}

/// Everything the decider needs to know about where a binding sits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormattingContext {
    /// Column the binding's line content starts at.
    pub indent_width: usize,
    pub max_line_width: usize,
    pub trailing_terminator: Terminator,
    /// Closing parentheses emitted between the initializer and the terminator.
    pub closing: usize,
    /// Leading whitespace for an initializer moved to its own line.
    pub continuation: String,
    pub wrap_long_assignments: bool,
    pub tie_break: TieBreak,
}

impl FormattingContext {
    pub fn new(
        config: &Configuration,
        indent_width: usize,
        base_indent: &str,
        trailing_terminator: Terminator,
    ) -> Self {
        Self {
            indent_width,
            max_line_width: config.line_width,
            trailing_terminator,
            closing: 0,
            continuation: format!("{base_indent}{}", config.indent_unit()),
            wrap_long_assignments: config.wrap_long_assignments,
            tie_break: config.tie_break,
        }
    }

    pub const fn trailing_width(&self) -> usize {
        self.trailing_terminator.width() + self.closing
    }
}

/// Layout chosen for one binding. The text excludes the terminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutDecision {
    /// `target = initializer` on one line.
    Inline(String),
    /// `target =` with the initializer on the next line, one level deeper.
    Wrapped(String),
    /// The initializer body is kept verbatim; only `target =` is normalized.
    Unchanged(String),
}

impl LayoutDecision {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Inline(_) => "inline",
            Self::Wrapped(_) => "wrapped",
            Self::Unchanged(_) => "unchanged",
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Inline(t) | Self::Wrapped(t) | Self::Unchanged(t) => t,
        }
    }
}
