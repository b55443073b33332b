//! neat_validator: Scope and declaration checking.
//!
//! The validator walks a parsed program once per scope to hoist `var` and
//! function names, then checks every construct against the environment:
//! undeclared references, redeclarations, parameter markers and pragma
//! placement. It also collects the runtime helpers pulled in by
//! `#include`, which the printer appends to the output.

mod scope;
mod validator;

pub use scope::{Binding, Env};
pub use validator::{validate, RequiredHelpers, Validator};
