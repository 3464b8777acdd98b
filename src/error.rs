use std::fmt;
use thiserror::Error;

/// 1-based line and column of a construct in the source file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part {
    Target,
    Initializer,
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Target => "assignment target",
            Self::Initializer => "initializer",
        })
    }
}

/// Failures of the layout engine. Both are recovered per node: an ambiguous
/// construct is passed through, a render failure keeps the original text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("{position}: ambiguous assignment construct ({reason})")]
    ClassificationAmbiguous {
        position: SourcePosition,
        reason: &'static str,
    },
    #[error("{position}: cannot render {part}")]
    Render {
        position: SourcePosition,
        part: Part,
    },
}

impl LayoutError {
    #[must_use]
    pub const fn position(&self) -> SourcePosition {
        match self {
            Self::ClassificationAmbiguous { position, .. } | Self::Render { position, .. } => {
                *position
            }
        }
    }
}
