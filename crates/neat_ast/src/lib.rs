//! neat_ast: Syntax tree definitions for the neat compiler.
//!
//! This crate defines the token kinds, the token type, every tree node, the
//! runtime helper table used by `#include` and the identifier groups used by
//! `#declare`.

pub mod declare_tags;
pub mod helpers;
pub mod node;
pub mod syntax_kind;
pub mod types;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;
