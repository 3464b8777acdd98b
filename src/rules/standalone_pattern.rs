use std::ops::Range;

use crate::engine::ast::{inside_error, opaque_spans};
use crate::engine::{Ctx, TextEdit};
use crate::rules::Rule;
use anyhow::Result;

const fn is_space(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\r'
}

const fn is_ws(b: u8) -> bool {
    is_space(b) || b == b'\n'
}

/// Characters that leave an expression unfinished at the end of a line, or
/// continue it at the start of the next one.
const fn is_continuation(b: u8) -> bool {
    matches!(
        b,
        b'=' | b'+' | b'-' | b'*' | b'/' | b'%' | b'&' | b'|' | b'^' | b'<' | b'>' | b'?'
            | b':' | b',' | b'.' | b'!' | b'~'
    )
}

/// Source bytes with the tree's strings, regexes, comments and JSX marked as
/// spans to jump over.
struct Scan<'a> {
    bytes: &'a [u8],
    opaque: Vec<Range<usize>>,
}

impl Scan<'_> {
    /// The opaque span containing `i`, if any.
    fn opaque_at(&self, i: usize) -> Option<&Range<usize>> {
        let idx = self.opaque.partition_point(|r| r.start <= i);
        let span = self.opaque.get(idx.checked_sub(1)?)?;
        (i < span.end).then_some(span)
    }

    fn is_comment(&self, span: &Range<usize>) -> bool {
        matches!(self.bytes.get(span.start..span.start + 2), Some(b"//" | b"/*"))
    }

    /// Index of the `}` closing the `{` at `open`.
    fn matching_brace(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut j = open;
        while j < self.bytes.len() {
            if let Some(span) = self.opaque_at(j) {
                j = span.end;
                continue;
            }
            match self.bytes[j] {
                b'{' | b'[' | b'(' => depth += 1,
                b'}' | b']' | b')' => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return (self.bytes[j] == b'}').then_some(j);
                    }
                }
                _ => {}
            }
            j += 1;
        }
        None
    }

    /// End of the right-hand side starting at `start`: the `;` at depth zero, a
    /// closer of an enclosing block, or a line break that ends the expression.
    /// Returns the index the closing parenthesis goes in front of.
    fn expression_end(&self, start: usize) -> usize {
        let bytes = self.bytes;
        let mut depth = 0usize;
        let mut last_sig: Option<u8> = None;
        let mut content_end = start;
        let mut j = start;
        while j < bytes.len() {
            if let Some(span) = self.opaque_at(j) {
                if self.is_comment(span) {
                    if depth == 0 && last_sig.is_some() {
                        return content_end;
                    }
                } else {
                    last_sig = Some(bytes[span.end - 1]);
                    content_end = span.end;
                }
                j = span.end;
                continue;
            }
            let b = bytes[j];
            match b {
                b';' if depth == 0 => return content_end,
                b'\n' if depth == 0 && last_sig.is_some_and(|p| !is_continuation(p)) => {
                    let next = bytes[j..].iter().position(|&c| !is_ws(c)).map(|p| bytes[j + p]);
                    if !next.is_some_and(is_continuation) {
                        return content_end;
                    }
                }
                b'{' | b'[' | b'(' => depth += 1,
                b'}' | b']' | b')' => {
                    if depth == 0 {
                        return content_end;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            if !is_ws(b) {
                last_sig = Some(b);
                content_end = j + 1;
            }
            j += 1;
        }
        content_end
    }
}

/// Wraps a statement-leading `{ ... } = value` in parentheses.
///
/// A brace at the start of a statement opens a block, so
/// `{ x, y }\n=\ncoordinates;` does not parse as an assignment at all. Adding
/// the parentheses turns it into `({ x, y }\n=\ncoordinates);`, which the
/// layout pass then joins onto one line. Only an `=` the parser rejected is
/// considered; patterns that already parse are left to the layout pass.
pub struct ParenthesizeStandalonePatterns;

impl Rule for ParenthesizeStandalonePatterns {
    fn name(&self) -> &'static str {
        "parenthesize_standalone_patterns"
    }

    fn run(&self, cx: &mut Ctx) -> Result<usize> {
        let bytes = cx.bytes();
        let root = cx.tree.root_node();
        let scan = Scan {
            bytes: &bytes,
            opaque: opaque_spans(root),
        };
        let len = bytes.len();
        let mut edits = Vec::new();

        // last byte outside whitespace and comments
        let mut last_sig: Option<u8> = None;
        let mut i = 0usize;
        while i < len {
            if let Some(span) = scan.opaque_at(i) {
                if !scan.is_comment(span) {
                    last_sig = Some(bytes[span.end - 1]);
                }
                i = span.end;
                continue;
            }
            let b = bytes[i];
            if is_ws(b) {
                i += 1;
                continue;
            }

            let starts_statement = matches!(last_sig, None | Some(b';' | b'}' | b'{'));
            if b == b'{'
                && starts_statement
                && let Some(close) = scan.matching_brace(i)
            {
                let eq = close + 1 + bytes[close + 1..].iter().take_while(|&&c| is_ws(c)).count();
                let is_assign = eq < len
                    && bytes[eq] == b'='
                    && !matches!(bytes.get(eq + 1), Some(b'=' | b'>'))
                    && inside_error(root, eq);
                if is_assign {
                    let end = scan.expression_end(eq + 1);
                    if end > eq + 1 {
                        edits.push(TextEdit {
                            start_byte: i,
                            end_byte: i,
                            replacement: "(".to_string(),
                        });
                        edits.push(TextEdit {
                            start_byte: end,
                            end_byte: end,
                            replacement: ")".to_string(),
                        });
                        tracing::debug!(byte = i, "parenthesized standalone pattern");
                        last_sig = Some(b')');
                        i = end;
                        continue;
                    }
                }
            }

            last_sig = Some(b);
            i += 1;
        }

        let n = edits.len() / 2;
        if n > 0 {
            cx.apply_edits(edits)?;
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::grammar::Dialect;
    use pretty_assertions::assert_eq;

    fn prepass(src: &str, dialect: Dialect) -> String {
        let mut cx = Ctx::new(src.to_string(), dialect, Configuration::default()).unwrap();
        ParenthesizeStandalonePatterns.run(&mut cx).unwrap();
        cx.to_string()
    }

    #[test]
    fn jsx_text_is_never_scanned() {
        let src = "const v = (\n  <p>\n    {a}\n    {b} = {c}\n  </p>\n);\n";
        assert_eq!(prepass(src, Dialect::Tsx), src);
    }
}
