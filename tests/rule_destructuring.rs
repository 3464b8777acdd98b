use assignment_fixer::{Configuration, Dialect, format_source, format_source_with};
use pretty_assertions::assert_eq;

#[test]
fn declared_patterns_are_joined() {
    let input = "const [first, second]\n=\nsomeArray;\nconst { data: { items } }\n=\nresponse;\n";
    let expected = "const [first, second] = someArray;\nconst { data: { items } } = response;\n";
    let out = format_source(input).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn standalone_object_pattern_gets_parentheses() {
    let input = "let x, y;\n{ x, y }\n=\ncoordinates;\n";
    let expected = "let x, y;\n({ x, y } = coordinates);\n";
    let out = format_source(input).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn parenthesized_pattern_is_joined() {
    let input = "({ x, y }\n=\ncoordinates);\n";
    let expected = "({ x, y } = coordinates);\n";
    let out = format_source(input).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn standalone_array_pattern_gets_parentheses() {
    let input = "[a, b]\n=\n[b, a];\n";
    let expected = "([a, b] = [b, a]);\n";
    let out = format_source(input).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn parenthesized_pattern_is_stable() {
    let input = "({ x, y } = coordinates);\n";
    let out = format_source(input).unwrap();
    assert_eq!(out, input);
}

#[test]
fn block_statement_is_not_a_pattern() {
    let input = "{\n  setup();\n}\nvalue\n=\n1;\n";
    let expected = "{\n  setup();\n}\nvalue = 1;\n";
    let out = format_source(input).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn braces_in_jsx_text_are_left_alone() {
    let input = "const v = (\n  <p>\n    {a}\n    {b} = {c}\n  </p>\n);\n";
    let out = format_source_with(input, Dialect::Tsx, &Configuration::default()).unwrap();
    assert_eq!(out, input);
}

#[test]
fn standalone_pattern_in_tsx_gets_parentheses() {
    let input = "let x;\n{ x }\n=\ny;\n";
    let expected = "let x;\n({ x } = y);\n";
    let out = format_source_with(input, Dialect::Tsx, &Configuration::default()).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn pattern_after_regex_with_quote_gets_parentheses() {
    let input = "const re = /\"/;\n{ x }\n=\ny;\n";
    let expected = "const re = /\"/;\n({ x } = y);\n";
    let out = format_source(input).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn pattern_inside_template_substitution_is_untouched() {
    let input = "const t = `${\n{ b } = c\n}`;\n{ x }\n=\ny;\n";
    let expected = "const t = `${\n{ b } = c\n}`;\n({ x } = y);\n";
    let out = format_source(input).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn pattern_after_statement_on_same_line_gets_parentheses() {
    let input = "a; { x } = y;\n";
    let expected = "a; ({ x } = y);\n";
    let out = format_source(input).unwrap();
    assert_eq!(out, expected);
}
