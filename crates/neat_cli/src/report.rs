//! Rendering compile errors with their source.

use miette::{NamedSource, SourceSpan};
use neat_diagnostics::Diagnostic;
use thiserror::Error;

/// A [`Diagnostic`] bundled with the text it points into.
#[derive(Debug, Error, miette::Diagnostic)]
#[error("{message}")]
#[diagnostic(code(neat::compile))]
pub struct SourceReport {
    message: String,
    #[help]
    kind: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("here")]
    span: SourceSpan,
}

impl SourceReport {
    pub fn new(diagnostic: &Diagnostic, source: &str) -> Self {
        let start = (diagnostic.span.start as usize).min(source.len());
        let length = (diagnostic.span.length as usize).min(source.len() - start);
        Self {
            message: diagnostic.to_string(),
            kind: format!("{} {}", diagnostic.kind, diagnostic.code),
            source_code: NamedSource::new(&diagnostic.file, source.to_string()),
            span: (start, length).into(),
        }
    }
}

/// Print `diagnostic` to stderr with a snippet of `source`.
pub fn print_diagnostic(diagnostic: &Diagnostic, source: &str) {
    eprintln!("{:?}", miette::Report::new(SourceReport::new(diagnostic, source)));
}

pub fn print_error(message: &str) {
    eprintln!("error: {}", message);
}
