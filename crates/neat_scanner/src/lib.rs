//! neat_scanner: Lexer for neat source code.
//!
//! Produces tokens on demand with:
//! - Verbatim trailing whitespace and comments attached to each token
//! - One-token peeking and restorable lookahead
//! - On-request string and regular expression literal scanning
//! - Unicode identifiers

mod char_codes;
mod scanner;

pub use neat_ast::types::{Token, TokenFlags};
pub use scanner::{Scanner, ScannerState};
