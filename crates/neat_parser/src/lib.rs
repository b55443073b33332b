//! neat_parser: Recursive descent parser for neat.
//!
//! Pulls tokens from the scanner on demand and builds an arena-allocated
//! syntax tree. Expressions use precedence climbing; statements dispatch on
//! the next token.

mod parser;
mod precedence;

pub use parser::{Parser, MAX_RECURSION_DEPTH};
pub use precedence::OperatorPrecedence;
