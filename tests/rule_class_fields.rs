use assignment_fixer::{Configuration, Dialect, format_source, format_source_with};
use pretty_assertions::assert_eq;

#[test]
fn field_initializer_is_joined() {
    let input = "class MyClass {\n  property\n  =\n  initialValue;\n}\n";
    let expected = "class MyClass {\n  property = initialValue;\n}\n";
    let out = format_source(input).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn modifiers_and_annotations_stay_on_the_target() {
    let input = "class Settings {\n  static defaults\n  =\n  {};\n  private name: string\n  =\n  \"settings\";\n  count;\n}\n";
    let expected = "class Settings {\n  static defaults = {};\n  private name: string = \"settings\";\n  count;\n}\n";
    let out = format_source(input).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn decorators_keep_their_own_line() {
    let input = "class View {\n  @Input()\n  label\n  =\n  \"\";\n}\n";
    let expected = "class View {\n  @Input()\n  label = \"\";\n}\n";
    let out = format_source(input).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn this_assignment_in_method_is_joined() {
    let input = "class MyClass {\n  method() {\n    this.property\n    =\n    newValue;\n  }\n}\n";
    let expected = "class MyClass {\n  method() {\n    this.property = newValue;\n  }\n}\n";
    let out = format_source(input).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn arrow_field_body_is_kept_and_inner_assignment_fixed() {
    let input = "class Counter {\n  reset = () => {\n    this.count\n    =\n    0;\n  };\n}\n";
    let expected = "class Counter {\n  reset = () => {\n    this.count = 0;\n  };\n}\n";
    let out = format_source(input).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn long_field_wraps_one_level_deeper() {
    let config = Configuration {
        line_width: 30,
        ..Configuration::default()
    };
    let input = "class Limits {\n  maximumRetries\n  =\n  defaultMaximumRetries;\n}\n";
    let expected = "class Limits {\n  maximumRetries =\n    (defaultMaximumRetries);\n}\n";
    let out = format_source_with(input, Dialect::TypeScript, &config).unwrap();
    assert_eq!(out, expected);
}
