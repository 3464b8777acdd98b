//! Width estimation for `target = initializer` lines.
//!
//! Plain character counting: one character is one column, tabs included.

use crate::config::TieBreak;
use crate::layout::node::FormattingContext;

/// Width of ` = `.
pub const ASSIGN_OP_WIDTH: usize = 3;

pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Width of the first line of `s`.
pub fn first_line_width(s: &str) -> usize {
    text_width(s.split('\n').next().unwrap_or_default())
}

/// One-line width of `target = initializer` at the context's column,
/// counting closing parentheses and the terminator. A multi-line initializer
/// contributes only its first line.
pub fn estimate_width(target: &str, initializer: &str, cx: &FormattingContext) -> usize {
    cx.indent_width
        + text_width(target)
        + ASSIGN_OP_WIDTH
        + first_line_width(initializer)
        + cx.trailing_width()
}

pub fn fits(width: usize, cx: &FormattingContext) -> bool {
    match cx.tie_break {
        TieBreak::Inline => width <= cx.max_line_width,
        TieBreak::Wrapped => width < cx.max_line_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::layout::node::Terminator;

    fn cx(indent: usize, terminator: Terminator) -> FormattingContext {
        FormattingContext::new(&Configuration::default(), indent, "", terminator)
    }

    #[test]
    fn counts_indent_operator_and_terminator() {
        let c = cx(4, Terminator::Semicolon);
        assert_eq!(estimate_width("const a", "42", &c), 4 + 7 + 3 + 2 + 1);
    }

    #[test]
    fn multi_line_initializer_uses_first_line() {
        let c = cx(0, Terminator::None);
        assert_eq!(estimate_width("x", "foo(\n  a,\n  b\n)", &c), 1 + 3 + 4);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(text_width("\"héllo\""), 7);
    }

    #[test]
    fn tie_break_policy() {
        let mut c = cx(0, Terminator::None);
        assert!(fits(80, &c));
        assert!(!fits(81, &c));
        c.tie_break = TieBreak::Wrapped;
        assert!(!fits(80, &c));
        assert!(fits(79, &c));
    }
}
