//! Statement classification over the tree-sitter syntax tree.
//!
//! Decides whether a statement is an assignment-like construct the engine lays
//! out, and if so extracts its target and initializer tokens together with the
//! forced multi-line predicate for the initializer.

use tree_sitter::Node;

use crate::engine::ast::{any_descendant, children_of, column_of};
use crate::error::{LayoutError, SourcePosition};
use crate::layout::node::{
    AssignmentKind, AssignmentNode, Binding, Expr, Gap, Leaf, Shape, Terminator,
};

/// Node kinds the layout pass hands to [`classify`].
pub const CANDIDATE_KINDS: &[&str] = &[
    "lexical_declaration",
    "variable_declaration",
    "public_field_definition",
    "field_definition",
    "expression_statement",
    "assignment_expression",
    "augmented_assignment_expression",
    "pair",
];

/// Tokens that are never split into their parts.
const ATOMIC_KINDS: &[&str] = &["string", "template_string", "regex", "comment", "jsx_text"];
const PATTERN_KINDS: &[&str] = &["object_pattern", "array_pattern", "object", "array"];
const REASSIGNABLE_KINDS: &[&str] = &["identifier", "member_expression", "subscript_expression"];
const CONDITION_STATEMENTS: &[&str] = &[
    "if_statement",
    "while_statement",
    "do_statement",
    "for_statement",
];
/// Kinds inside an initializer that always keep it multi-line.
const BLOCK_KINDS: &[&str] = &[
    "statement_block",
    "class_body",
    "comment",
    "jsx_element",
    "jsx_fragment",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    Eligible(AssignmentNode),
    NotEligible(Skip),
}

/// Why a node is passed through untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skip {
    /// `if (value = getValue())`
    ConditionalTest,
    ObjectProperty,
    /// Assignment nested in a larger expression.
    GenericExpression,
    /// `+=`, `||=` and friends.
    CompoundOperator,
    Comment,
    NoInitializer,
    NotAssignment,
}

/// Classify one syntax node.
///
/// `Err` means the node looked like an assignment but could not be read with
/// confidence; callers treat it as not eligible.
pub fn classify(node: Node<'_>, src: &str) -> Result<Classification, LayoutError> {
    match node.kind() {
        "lexical_declaration" | "variable_declaration" => declaration(node, src),
        "public_field_definition" | "field_definition" => class_field(node, src),
        "expression_statement" => statement(node, src),
        "assignment_expression" if in_condition(node) => {
            Ok(Classification::NotEligible(Skip::ConditionalTest))
        }
        "assignment_expression" => Ok(Classification::NotEligible(Skip::GenericExpression)),
        "augmented_assignment_expression" => {
            Ok(Classification::NotEligible(Skip::CompoundOperator))
        }
        "pair" => Ok(Classification::NotEligible(Skip::ObjectProperty)),
        _ => Ok(Classification::NotEligible(Skip::NotAssignment)),
    }
}

fn position_of(node: Node<'_>, src: &str) -> SourcePosition {
    let (column, _) = column_of(src, node.start_byte());
    SourcePosition {
        line: node.start_position().row + 1,
        column: column + 1,
    }
}

const fn ambiguous(position: SourcePosition, reason: &'static str) -> LayoutError {
    LayoutError::ClassificationAmbiguous { position, reason }
}

fn eligible(
    kind: AssignmentKind,
    start: usize,
    end: usize,
    terminator: Terminator,
    src: &str,
    position: SourcePosition,
) -> Classification {
    let (column, line_indent) = column_of(src, start);
    Classification::Eligible(AssignmentNode {
        kind,
        position,
        span: start..end,
        column,
        line_indent: line_indent.to_string(),
        terminator,
    })
}

fn declaration(node: Node<'_>, src: &str) -> Result<Classification, LayoutError> {
    let position = position_of(node, src);
    let children = children_of(node);
    let Some((first, rest)) = children.split_first() else {
        return Err(ambiguous(position, "empty declaration"));
    };
    let keyword = first.kind();
    if !matches!(keyword, "const" | "let" | "var") {
        return Ok(Classification::NotEligible(Skip::NotAssignment));
    }

    let mut declarators = Vec::new();
    let mut terminator = Terminator::None;
    for child in rest {
        match child.kind() {
            "variable_declarator" => declarators.push(*child),
            "," => {}
            ";" => terminator = Terminator::Semicolon,
            "comment" => return Ok(Classification::NotEligible(Skip::Comment)),
            _ => return Err(ambiguous(position, "unexpected token in declaration")),
        }
    }
    if declarators.is_empty() {
        return Err(ambiguous(position, "declaration without declarators"));
    }

    let (_, line_indent) = column_of(src, node.start_byte());
    let base = line_indent.chars().count();
    let bindings = declarators
        .iter()
        .map(|d| binding(*d, src, base, position))
        .collect::<Result<Vec<_>, _>>()?;
    if bindings.iter().all(|b| b.initializer.is_none()) {
        return Ok(Classification::NotEligible(Skip::NoInitializer));
    }

    let keyword = keyword.to_string();
    let in_for_header = node.parent().is_some_and(|p| p.kind() == "for_statement");
    let kind = if in_for_header {
        AssignmentKind::ForInit {
            keyword,
            declarators: bindings,
        }
    } else {
        match <[Binding; 1]>::try_from(bindings) {
            Ok([binding]) => AssignmentKind::Declaration { keyword, binding },
            Err(bindings) => {
                let stacked = declarators
                    .windows(2)
                    .any(|w| w[1].start_position().row > w[0].end_position().row);
                AssignmentKind::Compound {
                    keyword,
                    declarators: bindings,
                    stacked,
                }
            }
        }
    };
    Ok(eligible(
        kind,
        node.start_byte(),
        node.end_byte(),
        terminator,
        src,
        position,
    ))
}

fn class_field(node: Node<'_>, src: &str) -> Result<Classification, LayoutError> {
    let children = children_of(node);
    if !children.iter().any(|c| c.kind() == "=") {
        return Ok(Classification::NotEligible(Skip::NoInitializer));
    }
    // decorators keep their own lines
    let Some(start) = children.iter().find(|c| c.kind() != "decorator") else {
        return Ok(Classification::NotEligible(Skip::NoInitializer));
    };
    let position = position_of(*start, src);

    let (terminator, end) = match (children.last(), node.next_sibling()) {
        (Some(last), _) if last.kind() == ";" => (Terminator::Semicolon, node.end_byte()),
        (_, Some(next)) if next.kind() == ";" => (Terminator::Semicolon, next.end_byte()),
        (_, Some(next)) if next.kind() == "," => (Terminator::Comma, next.end_byte()),
        _ => (Terminator::None, node.end_byte()),
    };

    let (_, line_indent) = column_of(src, start.start_byte());
    let binding = binding(node, src, line_indent.chars().count(), position)?;
    Ok(eligible(
        AssignmentKind::ClassField(binding),
        start.start_byte(),
        end,
        terminator,
        src,
        position,
    ))
}

fn statement(node: Node<'_>, src: &str) -> Result<Classification, LayoutError> {
    let position = position_of(node, src);
    let mut expr = None;
    let mut terminator = Terminator::None;
    for child in children_of(node) {
        match child.kind() {
            ";" => terminator = Terminator::Semicolon,
            "comment" => return Ok(Classification::NotEligible(Skip::Comment)),
            _ if expr.is_none() => expr = Some(child),
            _ => return Err(ambiguous(position, "unexpected token after expression")),
        }
    }
    let Some(expr) = expr else {
        return Ok(Classification::NotEligible(Skip::NotAssignment));
    };

    let (assignment, parenthesized) = if expr.kind() == "parenthesized_expression" {
        let mut cursor = expr.walk();
        let inner: Vec<Node<'_>> = expr.named_children(&mut cursor).collect();
        match inner.as_slice() {
            [single] if single.kind() == "assignment_expression" => (*single, true),
            _ => return Ok(Classification::NotEligible(Skip::NotAssignment)),
        }
    } else {
        (expr, false)
    };
    match assignment.kind() {
        "assignment_expression" => {}
        "augmented_assignment_expression" => {
            return Ok(Classification::NotEligible(Skip::CompoundOperator));
        }
        _ => return Ok(Classification::NotEligible(Skip::NotAssignment)),
    }

    let Some(left) = assignment.child_by_field_name("left") else {
        return Err(ambiguous(position, "assignment without target"));
    };
    let (_, line_indent) = column_of(src, node.start_byte());
    let binding = binding(assignment, src, line_indent.chars().count(), position)?;
    let kind = if PATTERN_KINDS.contains(&left.kind()) {
        AssignmentKind::DestructuringStandalone(binding)
    } else if !parenthesized && REASSIGNABLE_KINDS.contains(&left.kind()) {
        AssignmentKind::Reassignment(binding)
    } else {
        return Err(ambiguous(position, "unsupported assignment target"));
    };
    Ok(eligible(
        kind,
        node.start_byte(),
        node.end_byte(),
        terminator,
        src,
        position,
    ))
}

/// True for an assignment inside the condition of `if`/`while`/`do`/`for`.
fn in_condition(node: Node<'_>) -> bool {
    let mut cur = node;
    while let Some(parent) = cur.parent() {
        let kind = parent.kind();
        if CONDITION_STATEMENTS.contains(&kind) {
            return parent.child_by_field_name("condition") == Some(cur);
        }
        if kind.ends_with("_statement")
            || kind.ends_with("declaration")
            || matches!(kind, "program" | "statement_block" | "class_body")
        {
            return false;
        }
        cur = parent;
    }
    false
}

/// Split a declarator, field definition or assignment at its `=`.
fn binding(
    node: Node<'_>,
    src: &str,
    base_indent: usize,
    position: SourcePosition,
) -> Result<Binding, LayoutError> {
    let children: Vec<Node<'_>> = children_of(node)
        .into_iter()
        .filter(|c| !matches!(c.kind(), "decorator" | ";"))
        .collect();
    if children.iter().any(|c| c.kind() == "comment") {
        return Err(ambiguous(position, "comment inside assignment"));
    }

    let (target, initializer) = match children.iter().position(|c| c.kind() == "=") {
        Some(i) => {
            let [value] = &children[i + 1..] else {
                return Err(ambiguous(position, "initializer is not a single expression"));
            };
            (&children[..i], Some(initializer(*value, src, base_indent)))
        }
        None => (&children[..], None),
    };
    if target.is_empty() {
        return Err(ambiguous(position, "assignment without target"));
    }
    Ok(Binding::new(
        expr_of(target, src, Shape::Simple),
        initializer,
    ))
}

fn initializer(node: Node<'_>, src: &str, base_indent: usize) -> Expr {
    expr_of(&[node], src, shape_of(node)).preserved(forced_multiline(node, src, base_indent))
}

fn shape_of(node: Node<'_>) -> Shape {
    match node.kind() {
        "parenthesized_expression" => Shape::Parenthesized,
        "template_string" => Shape::Template,
        "call_expression" | "new_expression" => Shape::Call,
        "await_expression" => match node.named_child(0) {
            Some(inner) if matches!(inner.kind(), "call_expression" | "new_expression") => {
                Shape::Call
            }
            _ => Shape::Simple,
        },
        _ => Shape::Simple,
    }
}

/// Multi-line structure in the initializer that the layout must not collapse.
fn forced_multiline(node: Node<'_>, src: &str, base_indent: usize) -> bool {
    let text = &src[node.byte_range()];
    if !text.contains('\n') {
        return false;
    }
    spread_call(node)
        || chained_calls(node) >= 2
        || any_descendant(node, &|n: Node<'_>| {
            BLOCK_KINDS.contains(&n.kind())
                || (ATOMIC_KINDS.contains(&n.kind()) && src[n.byte_range()].contains('\n'))
        })
        || indented_continuation(text, base_indent)
}

/// A call with two or more arguments.
fn spread_call(node: Node<'_>) -> bool {
    let call = if node.kind() == "await_expression" {
        match node.named_child(0) {
            Some(inner) => inner,
            None => return false,
        }
    } else {
        node
    };
    if !matches!(call.kind(), "call_expression" | "new_expression") {
        return false;
    }
    let Some(args) = call.child_by_field_name("arguments") else {
        return false;
    };
    let mut cursor = args.walk();
    args.named_children(&mut cursor)
        .filter(|a| a.kind() != "comment")
        .count()
        >= 2
}

/// Number of method calls in a `a.b().c()` chain.
fn chained_calls(node: Node<'_>) -> usize {
    let mut calls = 0;
    let mut cur = Some(node);
    while let Some(n) = cur {
        cur = match n.kind() {
            "call_expression" => {
                let function = n.child_by_field_name("function");
                if function.is_some_and(|f| f.kind() == "member_expression") {
                    calls += 1;
                }
                function
            }
            "member_expression" => n.child_by_field_name("object"),
            "await_expression" | "non_null_expression" => n.named_child(0),
            _ => None,
        };
    }
    calls
}

/// Some continuation line is indented deeper than the statement's line.
fn indented_continuation(text: &str, base_indent: usize) -> bool {
    text.split('\n')
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .any(|line| {
            line.chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .count()
                > base_indent
        })
}

/// Flatten sibling nodes into leaf tokens.
fn expr_of(nodes: &[Node<'_>], src: &str, shape: Shape) -> Expr {
    let (Some(first), Some(last)) = (nodes.first(), nodes.last()) else {
        return Expr::new(Vec::new(), "", shape).malformed(true);
    };
    let mut leaves = Vec::new();
    let mut last_end = None;
    let mut malformed = false;
    for n in nodes {
        collect_leaves(*n, src, &mut leaves, &mut last_end, &mut malformed);
    }
    Expr::new(leaves, &src[first.start_byte()..last.end_byte()], shape).malformed(malformed)
}

fn collect_leaves(
    node: Node<'_>,
    src: &str,
    leaves: &mut Vec<Leaf>,
    last_end: &mut Option<usize>,
    malformed: &mut bool,
) {
    if node.is_error() || node.is_missing() {
        *malformed = true;
    }
    if node.child_count() > 0 && !ATOMIC_KINDS.contains(&node.kind()) {
        for child in children_of(node) {
            collect_leaves(child, src, leaves, last_end, malformed);
        }
        return;
    }

    let gap = match *last_end {
        Some(end) if end <= node.start_byte() => {
            let ws = &src[end..node.start_byte()];
            if !ws.chars().all(char::is_whitespace) {
                *malformed = true;
            }
            if ws.contains('\n') {
                Gap::Break
            } else {
                Gap::Inline(ws.to_string())
            }
        }
        Some(_) => {
            *malformed = true;
            Gap::Inline(String::new())
        }
        None => Gap::Inline(String::new()),
    };
    let parent = node.parent().map_or("", |p| p.kind());
    leaves.push(Leaf::new(&src[node.byte_range()], node.kind(), parent, gap));
    *last_end = Some(node.end_byte());
}
