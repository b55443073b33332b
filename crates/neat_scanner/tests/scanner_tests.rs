//! Scanner integration tests.
//!
//! Verifies tokenization of the neat dialect and that tokens plus their
//! trailing trivia reproduce the source exactly.

use neat_ast::syntax_kind::SyntaxKind;
use neat_scanner::{Scanner, Token, TokenFlags};

/// Helper: scan every token, reading quoted literals the way the parser does.
fn scan_all(source: &str) -> (String, Vec<(SyntaxKind, String)>) {
    let mut scanner = Scanner::new("test.neat", source);
    let preamble = scanner.scan_preamble().to_string();
    let mut tokens = Vec::new();
    loop {
        let mut token = scanner.next().unwrap();
        if matches!(token.kind, SyntaxKind::DoubleQuoteToken | SyntaxKind::SingleQuoteToken) {
            token = scanner.read_quoted(token).unwrap();
        }
        if token.kind == SyntaxKind::EndOfFileToken {
            break;
        }
        tokens.push((token.kind, token.text.to_string()));
    }
    (preamble, tokens)
}

/// Helper: scan all token kinds.
fn scan_kinds(source: &str) -> Vec<SyntaxKind> {
    scan_all(source).1.into_iter().map(|(k, _)| k).collect()
}

/// Helper: rebuild the source from the preamble and each token's text and trailing trivia.
fn reconstruct(source: &str) -> String {
    let mut scanner = Scanner::new("test.neat", source);
    let mut out = scanner.scan_preamble().to_string();
    loop {
        let mut token: Token<'_> = scanner.next().unwrap();
        if matches!(token.kind, SyntaxKind::DoubleQuoteToken | SyntaxKind::SingleQuoteToken) {
            token = scanner.read_quoted(token).unwrap();
        }
        out.push_str(token.text);
        out.push_str(token.trailing);
        if token.kind == SyntaxKind::EndOfFileToken {
            break;
        }
    }
    out
}

fn scan_error(source: &str) -> String {
    let mut scanner = Scanner::new("test.neat", source);
    scanner.scan_preamble();
    loop {
        match scanner.next() {
            Ok(token) if token.kind == SyntaxKind::EndOfFileToken => {
                panic!("expected a scan error for {:?}", source)
            }
            Ok(token) if token.kind.is_quote() => {
                if let Err(e) = scanner.read_quoted(token) {
                    return e.message_text;
                }
            }
            Ok(_) => {}
            Err(e) => return e.message_text,
        }
    }
}

// ============================================================================
// Basic tokens
// ============================================================================

#[test]
fn test_empty_source() {
    let (preamble, tokens) = scan_all("");
    assert!(preamble.is_empty());
    assert!(tokens.is_empty());
}

#[test]
fn test_whitespace_only() {
    let (preamble, tokens) = scan_all("   \n\t  ");
    assert_eq!(preamble, "   \n\t  ");
    assert!(tokens.is_empty());
}

#[test]
fn test_numeric_literals() {
    assert_eq!(scan_all("42").1, vec![(SyntaxKind::NumericLiteral, "42".to_string())]);
    assert_eq!(scan_all("3.14").1, vec![(SyntaxKind::NumericLiteral, "3.14".to_string())]);
}

#[test]
fn test_longest_punctuation_wins() {
    assert_eq!(
        scan_kinds("a... -> :: == != += <= >= && ||"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::MinusGreaterThanToken,
            SyntaxKind::ColonColonToken,
            SyntaxKind::EqualsEqualsToken,
            SyntaxKind::ExclamationEqualsToken,
            SyntaxKind::PlusEqualsToken,
            SyntaxKind::LessThanEqualsToken,
            SyntaxKind::GreaterThanEqualsToken,
            SyntaxKind::AmpersandAmpersandToken,
            SyntaxKind::BarBarToken,
        ]
    );
}

#[test]
fn test_keywords_and_identifiers() {
    assert_eq!(
        scan_kinds("var variable function functions in instanceof typeof"),
        vec![
            SyntaxKind::VarKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::FunctionKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::InKeyword,
            SyntaxKind::InstanceOfKeyword,
            SyntaxKind::TypeOfKeyword,
        ]
    );
}

#[test]
fn test_unicode_identifiers() {
    assert_eq!(
        scan_all("café $el _x1").1,
        vec![
            (SyntaxKind::Identifier, "café".to_string()),
            (SyntaxKind::Identifier, "$el".to_string()),
            (SyntaxKind::Identifier, "_x1".to_string()),
        ]
    );
}

#[test]
fn test_pragmas() {
    assert_eq!(
        scan_kinds("#include each;\n#declare :node;"),
        vec![
            SyntaxKind::IncludePragma,
            SyntaxKind::Identifier,
            SyntaxKind::SemicolonToken,
            SyntaxKind::DeclarePragma,
            SyntaxKind::ColonToken,
            SyntaxKind::Identifier,
            SyntaxKind::SemicolonToken,
        ]
    );
}

#[test]
fn test_keywords_are_flagged_as_words() {
    let mut scanner = Scanner::new("test.neat", "default x");
    scanner.scan_preamble();
    assert!(scanner.next().unwrap().flags.contains(TokenFlags::WORD));
    assert!(!scanner.next().unwrap().is_word());
}

// ============================================================================
// Quoted literals
// ============================================================================

#[test]
fn test_string_literals() {
    assert_eq!(
        scan_all(r#"'it\'s' "say \"hi\"""#).1,
        vec![
            (SyntaxKind::StringLiteral, r"'it\'s'".to_string()),
            (SyntaxKind::StringLiteral, r#""say \"hi\"""#.to_string()),
        ]
    );
}

#[test]
fn test_string_keeps_leading_whitespace_and_comment_markers() {
    let (_, tokens) = scan_all("\"  /* not a comment */ \"");
    assert_eq!(
        tokens,
        vec![(SyntaxKind::StringLiteral, "\"  /* not a comment */ \"".to_string())]
    );
}

#[test]
fn test_regex_literal_with_flags() {
    let mut scanner = Scanner::new("test.neat", "/a\\/b/gi.test");
    scanner.scan_preamble();
    let open = scanner.next().unwrap();
    assert_eq!(open.kind, SyntaxKind::SlashToken);
    let regex = scanner.read_quoted(open).unwrap();
    assert_eq!(regex.kind, SyntaxKind::RegularExpressionLiteral);
    assert_eq!(regex.text, "/a\\/b/gi");
    assert!(regex.flags.contains(TokenFlags::QUOTED));
    assert_eq!(scanner.next().unwrap().kind, SyntaxKind::DotToken);
}

#[test]
fn test_regex_starting_with_equals() {
    let mut scanner = Scanner::new("test.neat", "/=+/");
    scanner.scan_preamble();
    let open = scanner.next().unwrap();
    assert_eq!(open.kind, SyntaxKind::SlashEqualsToken);
    assert_eq!(scanner.read_quoted(open).unwrap().text, "/=+/");
}

// ============================================================================
// Whitespace fidelity
// ============================================================================

#[test]
fn test_reconstruct_source() {
    let sources = [
        "",
        "var a = 1;",
        "#!/usr/bin/env neat\n// header\n\nvar a  =  'x  y' ;\n",
        "function f(a, b) {\r\n\treturn a + b; /* sum */\r\n}\r\n",
        "x = { \"k\": [1, 2.5, null], }; // trailing\n",
        "if (a == b) { c(); } else { d::e = -> _; }\n\n\n",
    ];
    for source in sources {
        assert_eq!(reconstruct(source), source);
    }
}

#[test]
fn test_trailing_trivia_is_attached_to_previous_token() {
    let mut scanner = Scanner::new("test.neat", "a /* c */ // d\n  b");
    scanner.scan_preamble();
    let a = scanner.next().unwrap();
    assert_eq!(a.trailing, " /* c */ // d\n  ");
    let b = scanner.next().unwrap();
    assert_eq!(b.pos, 17);
    assert_eq!(b.trailing, "");
}

#[test]
fn test_unclosed_block_comment_is_not_trivia() {
    assert_eq!(scan_error("a /* open"), "runaway regular expression literal");
}

// ============================================================================
// Lookahead
// ============================================================================

#[test]
fn test_look_ahead_restores_state() {
    let mut scanner = Scanner::new("test.neat", "a b c");
    scanner.scan_preamble();
    assert_eq!(scanner.peek().unwrap().text, "a");
    let third = scanner.look_ahead(|s| {
        s.next().unwrap();
        s.next().unwrap();
        s.next().unwrap().text
    });
    assert_eq!(third, "c");
    assert_eq!(scanner.next().unwrap().text, "a");
    assert_eq!(scanner.next().unwrap().text, "b");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_reserved_keywords() {
    assert_eq!(scan_error("this.x"), "'this' is a reserved keyword");
    assert_eq!(scan_error("try {"), "'try' is a reserved keyword");
    assert_eq!(scan_error("yield"), "'yield' is a reserved keyword");
}

#[test]
fn test_strict_equality_is_rejected() {
    assert_eq!(scan_error("a === b"), "use '==' instead of '==='");
    assert_eq!(scan_error("a !== b"), "use '!=' instead of '!=='");
}

#[test]
fn test_runaway_literals() {
    assert_eq!(scan_error("'abc"), "runaway string literal");
    assert_eq!(scan_error("\"abc\\\""), "runaway string literal");
    assert_eq!(scan_error("/abc"), "runaway regular expression literal");
}

#[test]
fn test_invalid_token_line() {
    let mut scanner = Scanner::new("test.neat", "a\nb\n  ~");
    scanner.scan_preamble();
    scanner.next().unwrap();
    scanner.next().unwrap();
    let error = scanner.next().unwrap_err();
    assert_eq!(error.line, 3);
    assert_eq!(error.to_string(), "test.neat, line 3: invalid token");
}
