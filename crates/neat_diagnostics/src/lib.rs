//! neat_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every error the compiler can report is listed once in [`messages`], with a
//! code, a kind and a `{0}`-style template. A realized [`Diagnostic`] carries
//! the resolved text together with the file, span and 1-based line where it
//! occurred.

use neat_core::text::{line_number, TextSpan};
use std::fmt;

/// Which stage of the pipeline rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The scanner or parser could not produce a tree.
    Syntax,
    /// The tree is well formed but breaks a declaration or scope rule.
    Validation,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Syntax => write!(f, "syntax error"),
            DiagnosticKind::Validation => write!(f, "validation error"),
        }
    }
}

/// A diagnostic message template with a code and kind.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (1xxx syntax, 2xxx validation).
    pub code: u32,
    pub kind: DiagnosticKind,
    /// The message template string. May contain `{0}`, `{1}` placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The identifier of the compiled file (usually its path).
    pub file: String,
    /// The source span of the offending token.
    pub span: TextSpan,
    /// 1-based line of `span.start`.
    pub line: u32,
    pub message_text: String,
    pub code: u32,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Create a diagnostic for `span` within `source`, computing its line.
    pub fn with_location(
        file: &str,
        source: &str,
        span: TextSpan,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: file.to_string(),
            span,
            line: line_number(source, span.start),
            message_text: format_message(message.message, args),
            code: message.code,
            kind: message.kind,
        }
    }

    pub fn is_syntax_error(&self) -> bool {
        self.kind == DiagnosticKind::Syntax
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, line {}: {}", self.file, self.line, self.message_text)
    }
}

impl std::error::Error for Diagnostic {}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics gathered across several files.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Sort diagnostics by file and position.
    pub fn sort(&mut self) {
        self.diagnostics
            .sort_by(|a, b| a.file.cmp(&b.file).then(a.span.start.cmp(&b.span.start)));
    }

    /// The rendered messages, one per line, in collection order.
    pub fn to_message_string(&self) -> String {
        self.diagnostics
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Syntax, $msg:expr) => {
            DiagnosticMessage { code: $code, kind: DiagnosticKind::Syntax, message: $msg }
        };
        ($code:expr, Validation, $msg:expr) => {
            DiagnosticMessage { code: $code, kind: DiagnosticKind::Validation, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors (1000-1099)
    // ========================================================================
    pub const INVALID_TOKEN: DiagnosticMessage = diag!(1001, Syntax, "invalid token");
    pub const RUNAWAY_STRING_LITERAL: DiagnosticMessage = diag!(1002, Syntax, "runaway string literal");
    pub const RUNAWAY_REGULAR_EXPRESSION_LITERAL: DiagnosticMessage = diag!(1003, Syntax, "runaway regular expression literal");
    pub const _0_IS_A_RESERVED_KEYWORD: DiagnosticMessage = diag!(1004, Syntax, "'{0}' is a reserved keyword");
    pub const USE_0_INSTEAD_OF_1: DiagnosticMessage = diag!(1005, Syntax, "use '{0}' instead of '{1}'");

    // ========================================================================
    // Parser errors (1100-1199)
    // ========================================================================
    pub const EXPECTED_0_INSTEAD_OF_1: DiagnosticMessage = diag!(1101, Syntax, "expected '{0}' instead of '{1}'");
    pub const INVALID_EXPRESSION: DiagnosticMessage = diag!(1102, Syntax, "invalid expression");
    pub const UNEXPECTED_0: DiagnosticMessage = diag!(1103, Syntax, "unexpected '{0}'");
    pub const UNEXPECTED_0_AFTER_PARENTHESIZED_LIST: DiagnosticMessage = diag!(1104, Syntax, "unexpected '{0}' after parenthesized list");
    pub const INVALID_FORMAL_PARAMETER_LIST_BEFORE_0: DiagnosticMessage = diag!(1105, Syntax, "invalid formal parameter list before '{0}'");
    pub const INVALID_LABELED_STATEMENT: DiagnosticMessage = diag!(1106, Syntax, "invalid labeled statement");
    pub const INVALID_OBJECT_KEY: DiagnosticMessage = diag!(1107, Syntax, "invalid object key");
    pub const NESTED_TOO_DEEPLY: DiagnosticMessage = diag!(1108, Syntax, "nested too deeply");

    // ========================================================================
    // Declaration errors (2000-2099)
    // ========================================================================
    pub const _0_IS_ALREADY_DECLARED_IN_THIS_SCOPE: DiagnosticMessage = diag!(2001, Validation, "'{0}' is already declared in this scope");
    pub const _0_HAS_NOT_BEEN_DECLARED: DiagnosticMessage = diag!(2002, Validation, "'{0}' has not been declared");
    pub const FUNCTIONS_MAY_ONLY_BE_DECLARED_IN_THE_TOP_LEVEL: DiagnosticMessage = diag!(2003, Validation, "functions may only be declared in the top-level of the program or directly within other functions");

    // ========================================================================
    // Parameter errors (2100-2199)
    // ========================================================================
    pub const PASS_IS_ONLY_ALLOWED_ON_THE_FIRST_PARAMETER: DiagnosticMessage = diag!(2101, Validation, "'@' is only allowed on the first parameter");
    pub const REST_IS_ONLY_ALLOWED_ON_THE_LAST_PARAMETER: DiagnosticMessage = diag!(2102, Validation, "'...' is only allowed on the last parameter");
    pub const ARROW_FUNCTIONS_CANNOT_HAVE_PASS_OR_REST_PARAMETERS: DiagnosticMessage = diag!(2103, Validation, "arrow functions cannot have '@' or '...' parameters");
    pub const INVALID_EXPRESSION_BEGINNING_WITH_AT: DiagnosticMessage = diag!(2104, Validation, "invalid expression beginning with '@'");
    pub const INVALID_EXPRESSION_ENDING_WITH_ELLIPSIS: DiagnosticMessage = diag!(2105, Validation, "invalid expression ending with '...'");

    // ========================================================================
    // Pragma errors (2200-2299)
    // ========================================================================
    pub const INCLUDE_IS_ONLY_ALLOWED_AT_THE_TOP_LEVEL: DiagnosticMessage = diag!(2201, Validation, "#include is only allowed at the top-level of the program");
    pub const DECLARE_IS_ONLY_ALLOWED_AT_THE_TOP_LEVEL: DiagnosticMessage = diag!(2202, Validation, "#declare is only allowed at the top-level of the program");
    pub const INVALID_DECLARATION_GROUP_0: DiagnosticMessage = diag!(2203, Validation, "invalid declaration group ':{0}'");
    pub const _0_IS_NOT_A_KNOWN_HELPER: DiagnosticMessage = diag!(2204, Validation, "'{0}' is not a known helper");
}
