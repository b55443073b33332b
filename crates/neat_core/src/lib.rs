//! neat_core: Core utilities for the neat compiler.
//!
//! Provides text spans and offset-to-line conversion used by every stage
//! of the pipeline when reporting diagnostics.

pub mod text;

pub use text::{line_number, TextPos, TextSpan};
