use std::path::Path;
use tree_sitter::Language;

/// File extensions the formatter picks up when expanding directories and globs.
pub const EXTENSIONS: &[&str] = &["ts", "mts", "cts", "tsx", "js", "mjs", "cjs", "jsx"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dialect {
    #[default]
    TypeScript,
    Tsx,
}

impl Dialect {
    #[must_use]
    pub fn language(self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Pick the grammar for a path, or `None` when the extension is not handled.
    /// Plain JavaScript goes through the TypeScript grammar, JSX through TSX.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "tsx" | "jsx" => Some(Self::Tsx),
            e if EXTENSIONS.contains(&e) => Some(Self::TypeScript),
            _ => None,
        }
    }
}
