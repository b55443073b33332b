//! Printer integration tests.
//!
//! Verifies that standard syntax is replayed byte for byte and that each
//! dialect construct is rewritten in place.

use bumpalo::Bump;
use neat_ast::helpers::helper_source;
use neat_parser::Parser;
use neat_printer::render;
use neat_validator::validate;

/// Helper: parse and render without validation or helpers.
fn print(source: &str) -> String {
    let arena = Bump::new();
    let program = Parser::new(&arena, "test.neat", source)
        .parse_program()
        .unwrap_or_else(|e| panic!("unexpected error for {:?}: {}", source, e));
    render(&program, std::iter::empty::<&str>())
}

/// Helper: parse, validate and render with the required helpers.
fn compile(source: &str) -> String {
    let arena = Bump::new();
    let program = Parser::new(&arena, "test.neat", source)
        .parse_program()
        .unwrap_or_else(|e| panic!("unexpected error for {:?}: {}", source, e));
    let helpers = validate(&program).unwrap_or_else(|e| panic!("invalid {:?}: {}", source, e));
    render(&program, helpers.iter().copied())
}

fn assert_round_trip(source: &str) {
    assert_eq!(print(source), source);
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_round_trip_empty() {
    assert_round_trip("");
    assert_round_trip("\n\n  // nothing here\n");
}

#[test]
fn test_round_trip_statements() {
    assert_round_trip("var a = 1, b;\nfunction f(x, y) {\n\treturn x + y; // sum\n}\n");
    assert_round_trip("if (a) {\n  b();\n} else if (c) { d(); } else {\n}\n");
    assert_round_trip("for (var i = 0; i < n; i += 1) { continue; }\nfor (;;) { break; }\n");
    assert_round_trip("for (var k in o) { }\nfor (k in o) { }\n");
    assert_round_trip("outer: while (true) {\n  break outer;\n}\n");
    assert_round_trip("switch (x) {\n  case 1:\n    a();\n  default:\n    b();\n}\n");
    assert_round_trip("{ ; }\n;\nthrow new Error('x');\n");
}

#[test]
fn test_round_trip_expressions() {
    assert_round_trip("x = a.b(c)[d].e;\n");
    assert_round_trip("x = !a && -b || typeof c;\n");
    assert_round_trip("x = a ? b : c ? d : e;\n");
    assert_round_trip("x = [1, 2.5, 'three', \"four\", null, true, false];\n");
    assert_round_trip("x = { a: 1, 'b': [ ] };\n");
    assert_round_trip("x = /a\\/b [c]/gi.test(s);\n");
    assert_round_trip("x = (a + b) * (c - d) / e % f;\n");
    assert_round_trip("x = function named(a) {\n  return a;\n};\n");
    assert_round_trip("delete a.b;\nx = a instanceof B;\n");
}

#[test]
fn test_round_trip_preamble_and_comments() {
    assert_round_trip("#!/usr/bin/env node\n/* header */\nvar a; /* one */ /* two */\n// end");
}

// ============================================================================
// Rewrites
// ============================================================================

#[test]
fn test_loose_equality_becomes_strict() {
    assert_eq!(print("x = a == b;"), "x = a === b;");
    assert_eq!(print("x = a != b;"), "x = a !== b;");
    assert_eq!(print("x = a  ==  b;"), "x = a  ===  b;");
}

#[test]
fn test_prototype_property() {
    assert_eq!(print("A::b = 1;"), "A.prototype.b = 1;");
    assert_eq!(print("x = A::;"), "x = A.prototype;");
    assert_eq!(print("A::b::c;"), "A.prototype.b.prototype.c;");
}

#[test]
fn test_object_trailing_comma_is_dropped() {
    assert_eq!(print("x = { a: 1, };"), "x = { a: 1 };");
    assert_eq!(print("x = {\n\ta: 1,\n\tb: 2,\n};"), "x = {\n\ta: 1,\n\tb: 2\n};");
    assert_eq!(print("x = [1, 2,];"), "x = [1, 2,];");
}

#[test]
fn test_shorthand_function_gains_keyword() {
    assert_eq!(print("f((a) {\n});"), "f(function (a) {\n});");
}

#[test]
fn test_pass_parameter_without_handler() {
    assert_eq!(
        print("function f(@, a) {\n}"),
        "function f(__err, a) { if (__err) { throw __err; }\n}"
    );
}

#[test]
fn test_pass_parameter_with_handler() {
    assert_eq!(
        compile("function cb() { }\nfunction f(@cb) { }"),
        "function cb() { }\nfunction f(__err) { if (__err) { cb(__err); return; } }"
    );
}

#[test]
fn test_this_binding() {
    assert_eq!(
        print("var f = (a) : self {\n};"),
        "var f = function (a) { var self = this;\n};"
    );
    assert_eq!(
        print("function g():self{}"),
        "function g(){ var self = this;}"
    );
}

#[test]
fn test_this_binding_keeps_line_breaks() {
    let output = print("var f = (a) :\n  self /* me */ {\n};\nf;");
    assert_eq!(
        output,
        "var f = function (a) \n   /* me */ { var self = this;\n};\nf;"
    );
    assert_eq!(output.lines().count(), 4);
}

#[test]
fn test_rest_parameter() {
    assert_eq!(
        print("function f(a, rest...) {\n}"),
        "function f(a, rest) { rest = [].slice.call(arguments, 1);\n}"
    );
}

#[test]
fn test_injection_order() {
    assert_eq!(
        print("var f = (@, xs...) : me { };"),
        "var f = function (__err, xs) { if (__err) { throw __err; } var me = this; xs = [].slice.call(arguments, 1); };"
    );
}

#[test]
fn test_arrow_functions() {
    assert_eq!(
        print("var f = (a, b) -> a + b;"),
        "var f = function (a, b) { return a + b; };"
    );
    assert_eq!(print("var f = () ->1;"), "var f = function () {return 1; };");
    assert_eq!(
        print("var g = -> _ * 2;"),
        "var g = function (_) { return _ * 2; };"
    );
}

#[test]
fn test_pragmas_become_comments() {
    let source = "#include each, map;\n#declare :node;\nvar x;\n";
    let expected = format!(
        "/* #include each, map; */  \n/* #declare :node; */ \nvar x;\n{}{}",
        helper_source("each").unwrap(),
        helper_source("map").unwrap()
    );
    assert_eq!(compile(source), expected);
}

#[test]
fn test_line_numbers_are_preserved() {
    let source = "#include once;\nvar f = (@, a,\n  b...) : me {\n  return -> a == b;\n};\nf::c = { x: 1,\n};\n";
    let output = compile(source);
    let body = output
        .strip_suffix(helper_source("once").unwrap())
        .unwrap();
    assert_eq!(body.matches('\n').count(), source.matches('\n').count());
}
