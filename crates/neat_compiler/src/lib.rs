//! neat_compiler: Compiler orchestration.
//!
//! Runs one source text through parse, validate and render, and drives
//! whole-directory compiles.

mod batch;

pub use batch::{compile_dir, compile_project, BatchError};

use bumpalo::Bump;
use neat_ast::Program;
use neat_diagnostics::Diagnostic;
use neat_parser::Parser;
use neat_validator::{validate, RequiredHelpers};

/// Compile `source` to JavaScript.
///
/// `file_name` only identifies the file in diagnostics. The output keeps
/// every line of the input on the same line, followed by the source of each
/// included helper.
pub fn compile(file_name: &str, source: &str) -> Result<String, Diagnostic> {
    let arena = Bump::new();
    let (program, helpers) = parse_and_validate(&arena, file_name, source)?;
    tracing::debug!(
        file = file_name,
        statements = program.statements.len(),
        helpers = ?helpers,
        "compiled"
    );
    Ok(neat_printer::render(&program, helpers.iter().copied()))
}

/// Parse `source` into `arena` and validate it.
///
/// Returns the tree with the helpers it includes, in inclusion order.
pub fn parse_and_validate<'a>(
    arena: &'a Bump,
    file_name: &str,
    source: &str,
) -> Result<(Program<'a>, RequiredHelpers), Diagnostic> {
    let program = Parser::new(arena, file_name, source).parse_program()?;
    let helpers = validate(&program)?;
    Ok((program, helpers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_plain_javascript() {
        let source = "var a = 1;\nfunction f(b) { return a + b; }\n";
        assert_eq!(compile("a.neat", source).unwrap(), source);
    }

    #[test]
    fn test_parse_and_validate_reports_helpers() {
        let arena = Bump::new();
        let (program, helpers) =
            parse_and_validate(&arena, "a.neat", "#include keys;\nkeys({});").unwrap();
        assert_eq!(program.statements.len(), 2);
        assert_eq!(helpers.len(), 1);
        assert!(helpers.contains("keys"));
    }
}
