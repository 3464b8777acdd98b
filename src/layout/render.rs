use crate::config::Configuration;
use crate::error::{LayoutError, Part, SourcePosition};
use crate::layout::decide::decide;
use crate::layout::node::{
    AssignmentKind, AssignmentNode, Binding, FormattingContext, LayoutDecision, Terminator,
};
use crate::layout::width::{fits, text_width};

/// Render the text that replaces `node.span`.
pub fn render(node: &AssignmentNode, config: &Configuration) -> Result<String, LayoutError> {
    let pos = node.position;
    let term = node.terminator;
    match &node.kind {
        AssignmentKind::Declaration { keyword, binding } => {
            let target = format!("{keyword} {}", target_text(binding, pos)?);
            let cx = node_context(node, config, node.column, term);
            let text = decided(&target, binding, &cx, node)?;
            Ok(format!("{text}{}", term.as_str()))
        }
        AssignmentKind::ClassField(binding) | AssignmentKind::Reassignment(binding) => {
            let target = target_text(binding, pos)?;
            let cx = node_context(node, config, node.column, term);
            let text = decided(&target, binding, &cx, node)?;
            Ok(format!("{text}{}", term.as_str()))
        }
        AssignmentKind::DestructuringStandalone(binding) => {
            let target = format!("({}", target_text(binding, pos)?);
            let mut cx = node_context(node, config, node.column, term);
            cx.closing = 1;
            let text = decided(&target, binding, &cx, node)?;
            Ok(format!("{text}){}", term.as_str()))
        }
        AssignmentKind::Compound {
            keyword,
            declarators,
            stacked,
        } => {
            if !stacked && let Some(line) = single_line(node, config, keyword, declarators)? {
                return Ok(line);
            }
            stacked_lines(node, config, keyword, declarators)
        }
        AssignmentKind::ForInit {
            keyword,
            declarators,
        } => {
            let mut col = node.column + text_width(keyword) + 1;
            let mut parts = Vec::with_capacity(declarators.len());
            for (i, binding) in declarators.iter().enumerate() {
                let t = if i + 1 == declarators.len() {
                    term
                } else {
                    Terminator::Comma
                };
                let cx = node_context(node, config, col, t);
                let text = decided(&target_text(binding, pos)?, binding, &cx, node)?;
                col += text_width(&text) + t.width() + 1;
                parts.push(text);
            }
            Ok(format!("{keyword} {}{}", parts.join(", "), term.as_str()))
        }
    }
}

fn target_text(binding: &Binding, position: SourcePosition) -> Result<String, LayoutError> {
    binding.target.one_line().ok_or(LayoutError::Render {
        position,
        part: Part::Target,
    })
}

fn node_context(
    node: &AssignmentNode,
    config: &Configuration,
    column: usize,
    terminator: Terminator,
) -> FormattingContext {
    FormattingContext::new(config, column, &node.line_indent, terminator)
}

fn decided(
    target: &str,
    binding: &Binding,
    cx: &FormattingContext,
    node: &AssignmentNode,
) -> Result<String, LayoutError> {
    let decision = decide(target, binding, cx, node.position)?;
    tracing::debug!(
        position = %node.position,
        kind = node.kind.name(),
        layout = decision.name(),
        "assignment laid out"
    );
    Ok(decision.into_text())
}

/// `let a = 1, b = 2;` when every declarator is inline and the whole line fits.
fn single_line(
    node: &AssignmentNode,
    config: &Configuration,
    keyword: &str,
    declarators: &[Binding],
) -> Result<Option<String>, LayoutError> {
    let mut col = node.column + text_width(keyword) + 1;
    let mut parts = Vec::with_capacity(declarators.len());
    for (i, binding) in declarators.iter().enumerate() {
        let t = if i + 1 == declarators.len() {
            node.terminator
        } else {
            Terminator::Comma
        };
        let cx = node_context(node, config, col, t);
        let LayoutDecision::Inline(text) =
            decide(&target_text(binding, node.position)?, binding, &cx, node.position)?
        else {
            return Ok(None);
        };
        col += text_width(&text) + t.width() + 1;
        parts.push(text);
    }
    let cx = node_context(node, config, 0, Terminator::None);
    if !fits(col.saturating_sub(1), &cx) {
        return Ok(None);
    }
    Ok(Some(format!(
        "{keyword} {}{}",
        parts.join(", "),
        node.terminator.as_str()
    )))
}

/// One declarator per line, aligned under the first declarator.
fn stacked_lines(
    node: &AssignmentNode,
    config: &Configuration,
    keyword: &str,
    declarators: &[Binding],
) -> Result<String, LayoutError> {
    let lead = text_width(keyword) + 1;
    let col = node.column + lead;
    let pad = node.column - text_width(&node.line_indent).min(node.column) + lead;
    let align = format!("{}{}", node.line_indent, " ".repeat(pad));

    let mut out = format!("{keyword} ");
    for (i, binding) in declarators.iter().enumerate() {
        let last = i + 1 == declarators.len();
        let t = if last { node.terminator } else { Terminator::Comma };
        let cx = FormattingContext::new(config, col, &align, t);
        if i > 0 {
            out.push('\n');
            out.push_str(&align);
        }
        out.push_str(&decided(&target_text(binding, node.position)?, binding, &cx, node)?);
        out.push_str(t.as_str());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::node::{Expr, Shape};
    use pretty_assertions::assert_eq;

    fn binding(target: &str, init: &str) -> Binding {
        Binding::new(Expr::atom(target), Some(Expr::atom(init)))
    }

    fn render_ok(node: &AssignmentNode) -> String {
        render(node, &Configuration::default()).unwrap()
    }

    #[test]
    fn declaration_keeps_keyword_and_semicolon() {
        let node = AssignmentNode::at_line_start(
            AssignmentKind::Declaration {
                keyword: "const".into(),
                binding: binding("shortVar", "42"),
            },
            Terminator::Semicolon,
        );
        assert_eq!(render_ok(&node), "const shortVar = 42;");
    }

    #[test]
    fn standalone_destructuring_is_parenthesized() {
        let node = AssignmentNode::at_line_start(
            AssignmentKind::DestructuringStandalone(binding("{ x, y }", "coordinates")),
            Terminator::Semicolon,
        );
        assert_eq!(render_ok(&node), "({ x, y } = coordinates);");
    }

    #[test]
    fn stacked_declarators_align_under_the_first() {
        let node = AssignmentNode::at_line_start(
            AssignmentKind::Compound {
                keyword: "let".into(),
                declarators: vec![binding("a", "1"), binding("b", "2"), binding("c", "3")],
                stacked: true,
            },
            Terminator::Semicolon,
        )
        .indented("  ");
        assert_eq!(render_ok(&node), "let a = 1,\n      b = 2,\n      c = 3;");
    }

    #[test]
    fn flat_declarators_stay_on_one_line() {
        let node = AssignmentNode::at_line_start(
            AssignmentKind::Compound {
                keyword: "var".into(),
                declarators: vec![binding("a", "1"), Binding::new(Expr::atom("b"), None)],
                stacked: false,
            },
            Terminator::Semicolon,
        );
        assert_eq!(render_ok(&node), "var a = 1, b;");
    }

    #[test]
    fn over_long_flat_declarators_are_stacked_and_decided_each() {
        let long = "x".repeat(80);
        let node = AssignmentNode::at_line_start(
            AssignmentKind::Compound {
                keyword: "let".into(),
                declarators: vec![binding("a", "1"), binding("b", &long)],
                stacked: false,
            },
            Terminator::Semicolon,
        );
        assert_eq!(
            render_ok(&node),
            format!("let a = 1,\n    b =\n      ({long});")
        );
    }

    #[test]
    fn class_field_wraps_one_level_deeper_than_its_line() {
        let long = "someVeryLongValueThatMightCauseLineBreaksWhenCombined".to_string();
        let node = AssignmentNode::at_line_start(
            AssignmentKind::ClassField(Binding::new(
                Expr::atom("propertyWithAFairlyLongName"),
                Some(Expr::atom(&long).with_shape(Shape::Simple)),
            )),
            Terminator::Semicolon,
        )
        .indented("  ");
        assert_eq!(
            render_ok(&node),
            format!("propertyWithAFairlyLongName =\n    ({long});")
        );
    }

    #[test]
    fn unrenderable_target_reports_its_position() {
        let node = AssignmentNode::at_line_start(
            AssignmentKind::Reassignment(Binding::new(
                Expr::atom("a").malformed(true),
                Some(Expr::atom("1")),
            )),
            Terminator::Semicolon,
        );
        let err = render(&node, &Configuration::default()).unwrap_err();
        assert_eq!(
            err,
            LayoutError::Render {
                position: node.position,
                part: Part::Target,
            }
        );
        assert_eq!(err.position(), SourcePosition { line: 1, column: 1 });
    }
}
