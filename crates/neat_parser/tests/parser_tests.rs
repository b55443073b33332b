//! Parser integration tests.
//!
//! Verifies that the parser builds the expected trees from neat source and
//! reports the first syntax error with its line.

use bumpalo::Bump;
use neat_ast::node::*;
use neat_ast::syntax_kind::SyntaxKind;
use neat_diagnostics::Diagnostic;
use neat_parser::Parser;

/// Helper: parse source text and hand the program to `check`.
fn with_program(source: &str, check: impl FnOnce(&Program<'_>)) {
    let arena = Bump::new();
    let program = Parser::new(&arena, "test.neat", source)
        .parse_program()
        .unwrap_or_else(|e| panic!("unexpected error for {:?}: {}", source, e));
    check(&program);
}

/// Helper: assert that parsing produces the expected number of top-level statements.
fn assert_statement_count(source: &str, expected: usize) {
    with_program(source, |program| {
        assert_eq!(program.statements.len(), expected, "source: {}", source)
    });
}

/// Helper: parse and return the syntax error.
fn parse_error(source: &str) -> Diagnostic {
    let arena = Bump::new();
    match Parser::new(&arena, "test.neat", source).parse_program() {
        Ok(_) => panic!("expected a syntax error for {:?}", source),
        Err(e) => e,
    }
}

fn assert_error(source: &str, message: &str) {
    let error = parse_error(source);
    assert_eq!(error.message_text, message, "source: {}", source);
    assert!(error.is_syntax_error());
}

/// Helper: the expression of the first statement.
fn first_expr<'a>(program: &Program<'a>) -> Expr<'a> {
    match program.statements[0] {
        Stmt::Expr(stmt) => stmt.expr,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

/// Helper: the value assigned by `x = ...;`.
fn assigned_value<'a>(program: &Program<'a>) -> Expr<'a> {
    match first_expr(program) {
        Expr::Binary(b) if b.operator.kind == SyntaxKind::EqualsToken => *b.right,
        other => panic!("expected an assignment, got {:?}", other),
    }
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_parse_empty_program() {
    assert_statement_count("", 0);
    assert_statement_count("\n  /* nothing */\n", 0);
}

#[test]
fn test_parse_var_statements() {
    assert_statement_count("var a; var b = 1, c = 'x', d;", 2);
    with_program("var a = 1, b;", |program| match program.statements[0] {
        Stmt::Var(v) => {
            assert_eq!(v.list.decls.len(), 2);
            assert_eq!(v.list.commas.len(), 1);
            assert!(v.list.decls[0].init.is_some());
            assert!(v.list.decls[1].init.is_none());
        }
        other => panic!("expected var, got {:?}", other),
    });
}

#[test]
fn test_parse_function_declaration() {
    with_program("function add(a, b) { return a + b; }", |program| match program.statements[0] {
        Stmt::Function(f) => {
            assert_eq!(f.name.map(|t| t.text), Some("add"));
            assert_eq!(f.params.params.len(), 2);
            assert!(f.this_binding.is_none());
            assert!(!f.is_shorthand());
            assert_eq!(f.body.statements.len(), 1);
        }
        other => panic!("expected function, got {:?}", other),
    });
}

#[test]
fn test_parse_function_declaration_with_this_binding() {
    with_program("function f() : self { }", |program| match program.statements[0] {
        Stmt::Function(f) => assert_eq!(f.this_binding.map(|b| b.name.text), Some("self")),
        other => panic!("expected function, got {:?}", other),
    });
}

#[test]
fn test_parse_if_else_chain() {
    with_program("if (a) { } else if (b) { } else { }", |program| match program.statements[0] {
        Stmt::If(s) => match s.else_clause.map(|c| c.body) {
            Some(ElseBody::If(inner)) => {
                assert!(matches!(
                    inner.else_clause.map(|c| c.body),
                    Some(ElseBody::Block(_))
                ));
            }
            other => panic!("expected else-if, got {:?}", other),
        },
        other => panic!("expected if, got {:?}", other),
    });
}

#[test]
fn test_parse_for_loops() {
    with_program("for (var i = 0, j = 1; i < 10; i += 1, j += 1) { }", |program| {
        match program.statements[0] {
            Stmt::For(s) => {
                assert!(matches!(s.init, ForInit::Var(ref v) if v.decls.len() == 2));
                assert_eq!(s.test.len(), 1);
                assert_eq!(s.update.len(), 2);
            }
            other => panic!("expected for, got {:?}", other),
        }
    });
    with_program("for (;;) { break; }", |program| match program.statements[0] {
        Stmt::For(s) => {
            assert!(matches!(s.init, ForInit::Exprs(ref e) if e.is_empty()));
            assert!(s.test.is_empty());
            assert!(s.update.is_empty());
        }
        other => panic!("expected for, got {:?}", other),
    });
}

#[test]
fn test_parse_for_in() {
    with_program("for (var k in o) { }", |program| match program.statements[0] {
        Stmt::ForIn(s) => {
            assert!(s.var_keyword.is_some());
            assert_eq!(s.name.text, "k");
        }
        other => panic!("expected for-in, got {:?}", other),
    });
    with_program("for (k in o.items) { }", |program| match program.statements[0] {
        Stmt::ForIn(s) => assert!(s.var_keyword.is_none()),
        other => panic!("expected for-in, got {:?}", other),
    });
}

#[test]
fn test_parse_jumps_and_return() {
    with_program("outer: while (x) { continue outer; break; }", |program| {
        match program.statements[0] {
            Stmt::Labeled(s) => {
                assert_eq!(s.label.text, "outer");
                match s.body {
                    Stmt::While(w) => match w.body.statements[0] {
                        Stmt::Continue(j) => assert_eq!(j.label.map(|t| t.text), Some("outer")),
                        other => panic!("expected continue, got {:?}", other),
                    },
                    other => panic!("expected while, got {:?}", other),
                }
            }
            other => panic!("expected labeled statement, got {:?}", other),
        }
    });
    with_program("function f() { return; }", |program| match program.statements[0] {
        Stmt::Function(f) => {
            assert!(matches!(f.body.statements[0], Stmt::Return(r) if r.value.is_none()))
        }
        other => panic!("expected function, got {:?}", other),
    });
}

#[test]
fn test_parse_switch() {
    let source = "switch (x) { case 1: a(); case (b): break; default: c(); d(); }";
    with_program(source, |program| match program.statements[0] {
        Stmt::Switch(s) => {
            assert_eq!(s.clauses.len(), 3);
            assert!(s.clauses[0].test.is_some());
            assert!(matches!(s.clauses[1].test, Some(Expr::Group(_))));
            assert!(s.clauses[2].test.is_none());
            assert_eq!(s.clauses[2].statements.len(), 2);
        }
        other => panic!("expected switch, got {:?}", other),
    });
}

#[test]
fn test_parse_blocks_and_empty_statements() {
    assert_statement_count("{ var a; } ; ;", 3);
}

#[test]
fn test_parse_pragmas() {
    with_program("#include each, map;\n#declare $, :node;", |program| {
        match program.statements[0] {
            Stmt::Include(p) => assert_eq!(p.items.len(), 2),
            other => panic!("expected #include, got {:?}", other),
        }
        match program.statements[1] {
            Stmt::Declare(p) => {
                assert!(matches!(p.items[0], PragmaItem::Name(t) if t.text == "$"));
                assert!(matches!(p.items[1], PragmaItem::Tag { name, .. } if name.text == "node"));
            }
            other => panic!("expected #declare, got {:?}", other),
        }
    });
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    with_program("1 + 2 * 3;", |program| match first_expr(program) {
        Expr::Binary(b) => {
            assert_eq!(b.operator.kind, SyntaxKind::PlusToken);
            assert!(matches!(b.left, Expr::Number(_)));
            assert!(matches!(b.right, Expr::Binary(r) if r.operator.kind == SyntaxKind::AsteriskToken));
        }
        other => panic!("expected binary, got {:?}", other),
    });
}

#[test]
fn test_subtraction_is_left_associative() {
    with_program("a - b - c;", |program| match first_expr(program) {
        Expr::Binary(b) => {
            assert!(matches!(b.left, Expr::Binary(_)));
            assert!(matches!(b.right, Expr::Ident(t) if t.text == "c"));
        }
        other => panic!("expected binary, got {:?}", other),
    });
}

#[test]
fn test_assignment_is_right_associative() {
    with_program("a = b = 1;", |program| match first_expr(program) {
        Expr::Binary(b) => {
            assert!(matches!(b.left, Expr::Ident(t) if t.text == "a"));
            assert!(matches!(b.right, Expr::Binary(r) if r.operator.kind == SyntaxKind::EqualsToken));
        }
        other => panic!("expected binary, got {:?}", other),
    });
}

#[test]
fn test_nested_ternary_in_alternate() {
    with_program("a ? b : c ? d : e;", |program| match first_expr(program) {
        Expr::Ternary(t) => {
            assert!(matches!(t.when_true, Expr::Ident(_)));
            assert!(matches!(t.when_false, Expr::Ternary(_)));
        }
        other => panic!("expected ternary, got {:?}", other),
    });
}

#[test]
fn test_unary_binds_tightest() {
    with_program("!a && typeof b.c == 'x';", |program| match first_expr(program) {
        Expr::Binary(b) => {
            assert_eq!(b.operator.kind, SyntaxKind::AmpersandAmpersandToken);
            assert!(matches!(b.left, Expr::Unary(_)));
            match b.right {
                Expr::Binary(eq) => {
                    assert!(matches!(eq.left, Expr::Unary(u) if matches!(u.operand, Expr::Property(_))))
                }
                other => panic!("expected equality, got {:?}", other),
            }
        }
        other => panic!("expected binary, got {:?}", other),
    });
}

#[test]
fn test_postfix_chain() {
    with_program("a.b(1)[2].c::d::;", |program| match first_expr(program) {
        Expr::PrototypeProperty(p) => {
            assert!(p.name.is_none());
            match p.target {
                Expr::PrototypeProperty(inner) => {
                    assert_eq!(inner.name.map(|t| t.text), Some("d"));
                    assert!(matches!(inner.target, Expr::Property(_)));
                }
                other => panic!("expected prototype property, got {:?}", other),
            }
        }
        other => panic!("expected prototype property, got {:?}", other),
    });
}

#[test]
fn test_reserved_word_property_names() {
    with_program("a.default.new(b.in);", |program| match first_expr(program) {
        Expr::Invoke(i) => {
            assert_eq!(i.name.text, "new");
            assert!(matches!(i.target, Expr::Property(p) if p.name.text == "default"));
        }
        other => panic!("expected invoke, got {:?}", other),
    });
}

#[test]
fn test_new_with_dotted_constructor() {
    with_program("x = new a.b.C(1, 2);", |program| match assigned_value(program) {
        Expr::New(n) => {
            assert_eq!(n.arguments.len(), 2);
            assert!(matches!(n.callee, Expr::Property(p) if p.name.text == "C"));
        }
        other => panic!("expected new, got {:?}", other),
    });
}

#[test]
fn test_literals() {
    with_program("x = [1, 2.5, 'a', \"b\", null, true, false];", |program| {
        match assigned_value(program) {
            Expr::Array(a) => {
                assert_eq!(a.elements.len(), 7);
                assert!(matches!(a.elements.elements[4], Expr::Null(_)));
                assert!(matches!(a.elements.elements[5], Expr::Bool(_)));
            }
            other => panic!("expected array, got {:?}", other),
        }
    });
}

#[test]
fn test_string_keeps_inner_whitespace() {
    with_program("x = \"a  // b\" ;", |program| match assigned_value(program) {
        Expr::String(t) => {
            assert_eq!(t.kind, SyntaxKind::StringLiteral);
            assert_eq!(t.text, "\"a  // b\"");
            assert_eq!(t.trailing, " ");
        }
        other => panic!("expected string, got {:?}", other),
    });
}

#[test]
fn test_regex_and_division() {
    with_program("x = /ab+c/gi;", |program| match assigned_value(program) {
        Expr::String(t) => {
            assert_eq!(t.kind, SyntaxKind::RegularExpressionLiteral);
            assert_eq!(t.text, "/ab+c/gi");
        }
        other => panic!("expected regex, got {:?}", other),
    });
    with_program("x = a / b;", |program| match assigned_value(program) {
        Expr::Binary(b) => assert_eq!(b.operator.kind, SyntaxKind::SlashToken),
        other => panic!("expected division, got {:?}", other),
    });
}

#[test]
fn test_object_literal() {
    with_program("x = { a: 1, 'b c': 2, };", |program| match assigned_value(program) {
        Expr::Object(o) => {
            assert_eq!(o.properties.len(), 2);
            assert!(o.has_trailing_comma());
            assert_eq!(o.properties[1].key.text, "'b c'");
        }
        other => panic!("expected object, got {:?}", other),
    });
    with_program("x = {};", |program| {
        assert!(matches!(assigned_value(program), Expr::Object(o) if o.properties.is_empty()))
    });
}

#[test]
fn test_pass_and_rest_markers() {
    with_program("f(@, @next, rest...);", |program| match first_expr(program) {
        Expr::Call(c) => {
            assert!(matches!(c.arguments.elements[0], Expr::Pass(p) if p.handler.is_none()));
            assert!(matches!(c.arguments.elements[1], Expr::Pass(p) if p.handler.is_some()));
            assert!(matches!(c.arguments.elements[2], Expr::Yada(y) if y.name.text == "rest"));
        }
        other => panic!("expected call, got {:?}", other),
    });
}

// ============================================================================
// Parenthesized lists
// ============================================================================

#[test]
fn test_group() {
    with_program("x = (a + b) * c;", |program| match assigned_value(program) {
        Expr::Binary(b) => assert!(matches!(b.left, Expr::Group(_))),
        other => panic!("expected binary, got {:?}", other),
    });
}

#[test]
fn test_shorthand_function() {
    with_program("f((@cb, a, rest...) { });", |program| match first_expr(program) {
        Expr::Call(c) => match c.arguments.elements[0] {
            Expr::Function(f) => {
                assert!(f.is_shorthand());
                assert!(matches!(f.params.params[0], Param::Pass(_)));
                assert!(matches!(f.params.params[1], Param::Ident(_)));
                assert!(matches!(f.params.params[2], Param::Rest(_)));
            }
            other => panic!("expected function, got {:?}", other),
        },
        other => panic!("expected call, got {:?}", other),
    });
}

#[test]
fn test_shorthand_function_with_this_binding() {
    with_program("x = (a) : self { };", |program| match assigned_value(program) {
        Expr::Function(f) => assert_eq!(f.this_binding.map(|b| b.name.text), Some("self")),
        other => panic!("expected function, got {:?}", other),
    });
}

#[test]
fn test_function_expression() {
    with_program("x = function named(a) { };", |program| match assigned_value(program) {
        Expr::Function(f) => {
            assert!(f.keyword.is_some());
            assert_eq!(f.name.map(|t| t.text), Some("named"));
        }
        other => panic!("expected function, got {:?}", other),
    });
}

#[test]
fn test_arrow_functions() {
    with_program("x = (a, b) -> a + b;", |program| match assigned_value(program) {
        Expr::Arrow(a) => {
            assert_eq!(a.params.params.len(), 2);
            assert!(matches!(a.body, Expr::Binary(_)));
        }
        other => panic!("expected arrow, got {:?}", other),
    });
    with_program("x = -> _ * 2;", |program| {
        assert!(matches!(assigned_value(program), Expr::SimpleArrow(_)))
    });
}

#[test]
fn test_ternary_consequent_group_before_colon() {
    with_program("x = c ? (a) : b;", |program| match assigned_value(program) {
        Expr::Ternary(t) => assert!(matches!(t.when_true, Expr::Group(_))),
        other => panic!("expected ternary, got {:?}", other),
    });
}

#[test]
fn test_ternary_consequent_function_with_this_binding() {
    with_program("x = c ? (a) : self { } : b;", |program| match assigned_value(program) {
        Expr::Ternary(t) => {
            assert!(matches!(t.when_true, Expr::Function(f) if f.this_binding.is_some()));
            assert!(matches!(t.when_false, Expr::Ident(_)));
        }
        other => panic!("expected ternary, got {:?}", other),
    });
}

// ============================================================================
// Whitespace retention
// ============================================================================

#[test]
fn test_tokens_keep_trailing_trivia() {
    with_program("#!/bin/neat\n  a  =  1 /* one */ ;\n", |program| {
        assert_eq!(program.preamble, "#!/bin/neat\n  ");
        match program.statements[0] {
            Stmt::Expr(s) => {
                assert_eq!(s.semicolon.trailing, "\n");
                match s.expr {
                    Expr::Binary(b) => {
                        assert_eq!(b.operator.trailing, "  ");
                        assert!(matches!(b.right, Expr::Number(n) if n.trailing == " /* one */ "));
                    }
                    other => panic!("expected binary, got {:?}", other),
                }
            }
            other => panic!("expected expression statement, got {:?}", other),
        }
    });
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_error_missing_semicolon() {
    assert_error("a = 1", "expected ';' instead of 'end of file'");
    assert_error("var a = 1 var", "expected ';' instead of 'var'");
}

#[test]
fn test_error_invalid_expression() {
    assert_error("x = ;", "invalid expression");
    assert_error("x = );", "invalid expression");
}

#[test]
fn test_error_invalid_labeled_statement() {
    assert_error("label: x = 1;", "invalid labeled statement");
    assert_error("label: if (x) { }", "invalid labeled statement");
}

#[test]
fn test_error_parenthesized_lists() {
    assert_error("(a, b);", "unexpected ';' after parenthesized list");
    assert_error("(a,);", "unexpected ';' after parenthesized list");
    assert_error("x = ();", "unexpected ';' after parenthesized list");
    assert_error("(1) { }", "invalid formal parameter list before '{'");
    assert_error("x = (a + b) -> a;", "invalid formal parameter list before '->'");
    assert_error("x = (a) : b;", "expected '{' instead of ';'");
}

#[test]
fn test_error_rest_marker_after_non_identifier() {
    assert_error("f(a.b...);", "unexpected '...'");
}

#[test]
fn test_error_property_name() {
    assert_error("a.1;", "expected 'identifier' instead of '1'");
}

#[test]
fn test_error_object_keys() {
    assert_error("x = { 1: 2 };", "invalid object key");
    assert_error("x = { a 1 };", "expected ':' instead of '1'");
}

#[test]
fn test_error_pragma_tags_only_in_declare() {
    assert_error("#include :node;", "expected 'identifier' instead of ':'");
}

#[test]
fn test_error_switch_body() {
    assert_error("switch (x) { a(); }", "expected 'case' instead of 'a'");
}

#[test]
fn test_error_from_scanner() {
    assert_error("x = this;", "'this' is a reserved keyword");
    assert_error("a === b;", "use '==' instead of '==='");
    assert_error("x = 'abc;", "runaway string literal");
    assert_error("x = /abc;", "runaway regular expression literal");
    assert_error("x = a ~ b;", "invalid token");
}

#[test]
fn test_error_line_number() {
    let error = parse_error("var a;\nvar b;\n\n// comment\nvar = 3;\n");
    assert_eq!(error.line, 5);
    assert_eq!(error.to_string(), "test.neat, line 5: expected 'identifier' instead of '='");
}
