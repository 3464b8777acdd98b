// src/engine/ast.rs
use std::ops::Range;
use tree_sitter::Node;

/// Byte ranges the pre-pass scanners never look inside: strings, templates,
/// regexes, comments and JSX. Outermost ranges only, in document order.
#[must_use]
pub fn opaque_spans(root: Node) -> Vec<Range<usize>> {
    const OPAQUE_KINDS: &[&str] = &[
        "string",
        "template_string",
        "regex",
        "comment",
        "jsx_element",
        "jsx_self_closing_element",
        "jsx_fragment",
    ];
    let mut spans: Vec<Range<usize>> = Vec::new();
    for n in descendants_of_kinds(root, OPAQUE_KINDS) {
        if spans.last().is_some_and(|last| n.start_byte() < last.end) {
            continue;
        }
        spans.push(n.byte_range());
    }
    spans
}

/// True if the token at `byte` sits inside an `ERROR` node.
#[must_use]
pub fn inside_error(root: Node, byte: usize) -> bool {
    let mut cur = root.descendant_for_byte_range(byte, byte + 1);
    while let Some(n) = cur {
        if n.is_error() {
            return true;
        }
        cur = n.parent();
    }
    false
}

/// Collect all descendants of `root` whose `kind()` is one of `kinds`, in
/// document order (parents before their children).
pub fn descendants_of_kinds<'a>(
    root: Node<'a>,
    kinds: &[&str],
) -> impl Iterator<Item = Node<'a>> {
    let mut out = Vec::new();

    fn dfs<'a>(node: Node<'a>, kinds: &[&str], out: &mut Vec<Node<'a>>) {
        if kinds.contains(&node.kind()) {
            out.push(node);
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            dfs(child, kinds, out);
        }
    }

    dfs(root, kinds, &mut out);
    out.into_iter()
}

/// All direct children, named and anonymous.
#[must_use]
pub fn children_of(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// True if `node` or any descendant satisfies `pred`.
pub fn any_descendant(node: Node, pred: &impl Fn(Node) -> bool) -> bool {
    if pred(node) {
        return true;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if any_descendant(child, pred) {
            return true;
        }
    }
    false
}

/// Column (in characters) of `byte` on its line, and the leading whitespace of that line.
#[must_use]
pub fn column_of(src: &str, byte: usize) -> (usize, &str) {
    let line_start = src[..byte].rfind('\n').map_or(0, |i| i + 1);
    let column = src[line_start..byte].chars().count();
    let line = &src[line_start..];
    let indent_len = line
        .bytes()
        .take_while(|&b| b == b' ' || b == b'\t')
        .count();
    (column, &line[..indent_len])
}
