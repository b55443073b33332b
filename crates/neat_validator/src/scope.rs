//! The declaration environment.

use rustc_hash::FxHashMap;

/// How a name came to be visible in an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Declared in this exact function or program scope.
    Declared,
    /// Visible from an enclosing scope; a local declaration may shadow it.
    Inherited,
}

/// The names visible in one function or program scope.
///
/// Non-function blocks share their scope's environment. Entering a function
/// or arrow body forks it.
#[derive(Debug, Clone, Default)]
pub struct Env<'a> {
    names: FxHashMap<&'a str, Binding>,
}

impl<'a> Env<'a> {
    pub fn new() -> Self {
        Self {
            names: FxHashMap::default(),
        }
    }

    /// A copy for a nested function scope, every entry demoted to `Inherited`.
    pub fn fork(&self) -> Self {
        Self {
            names: self
                .names
                .keys()
                .map(|&name| (name, Binding::Inherited))
                .collect(),
        }
    }

    /// Declare `name` in this scope. Returns `false` if it was already
    /// declared here.
    pub fn declare(&mut self, name: &'a str) -> bool {
        match self.names.insert(name, Binding::Declared) {
            Some(Binding::Declared) => false,
            _ => true,
        }
    }

    /// Mark `name` declared here without a redeclaration check.
    pub fn mark_declared(&mut self, name: &'a str) {
        self.names.insert(name, Binding::Declared);
    }

    /// Make `name` visible without claiming it for this scope.
    pub fn inherit(&mut self, name: &'a str) {
        self.names.entry(name).or_insert(Binding::Inherited);
    }

    pub fn binding(&self, name: &str) -> Option<Binding> {
        self.names.get(name).copied()
    }

    /// Whether `name` may be referenced.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }
}
