//! neat_options: Project configuration.
//!
//! Parses `neat.json` files:
//!
//! ```json
//! { "compilerOptions": { "rootDir": "src", "outDir": "lib" } }
//! ```
//!
//! Every field is optional. [`CompilerOptions::resolve`] fills in the
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default source directory for batch compiles.
pub const DEFAULT_ROOT_DIR: &str = "src";
/// Default output directory for batch compiles.
pub const DEFAULT_OUT_DIR: &str = "lib";
/// Extension of dialect source files.
pub const DEFAULT_EXTENSION: &str = "neat";
/// Extension given to compiled files.
pub const DEFAULT_OUT_EXTENSION: &str = "js";

/// Compiler options, as written in a project file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub root_dir: Option<String>,
    pub out_dir: Option<String>,
    /// Source extension, without the leading dot.
    pub extension: Option<String>,
    pub out_extension: Option<String>,
}

impl CompilerOptions {
    /// Apply defaults for every unset field.
    pub fn resolve(&self) -> ResolvedOptions {
        ResolvedOptions {
            root_dir: PathBuf::from(self.root_dir.as_deref().unwrap_or(DEFAULT_ROOT_DIR)),
            out_dir: PathBuf::from(self.out_dir.as_deref().unwrap_or(DEFAULT_OUT_DIR)),
            extension: trim_dot(self.extension.as_deref().unwrap_or(DEFAULT_EXTENSION)),
            out_extension: trim_dot(
                self.out_extension
                    .as_deref()
                    .unwrap_or(DEFAULT_OUT_EXTENSION),
            ),
        }
    }
}

fn trim_dot(extension: &str) -> String {
    extension.trim_start_matches('.').to_string()
}

/// Compiler options with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub root_dir: PathBuf,
    pub out_dir: PathBuf,
    pub extension: String,
    pub out_extension: String,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        CompilerOptions::default().resolve()
    }
}

impl ResolvedOptions {
    /// Relative paths in the options are taken relative to `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        if self.root_dir.is_relative() {
            self.root_dir = base.join(&self.root_dir);
        }
        if self.out_dir.is_relative() {
            self.out_dir = base.join(&self.out_dir);
        }
        self
    }

    /// Whether `path` carries the source extension.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .map_or(false, |ext| ext == self.extension.as_str())
    }

    /// `path` with its extension replaced by the output extension.
    pub fn output_path(&self, path: &Path) -> PathBuf {
        path.with_extension(&self.out_extension)
    }
}

/// The `neat.json` file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeatConfig {
    pub compiler_options: Option<CompilerOptions>,
}

impl NeatConfig {
    pub fn options(&self) -> CompilerOptions {
        self.compiler_options.clone().unwrap_or_default()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid project file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a project file from a string.
pub fn parse_config(content: &str) -> Result<NeatConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parse a project file from a path.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<NeatConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let resolved = ResolvedOptions::default();
        assert_eq!(resolved.root_dir, PathBuf::from("src"));
        assert_eq!(resolved.out_dir, PathBuf::from("lib"));
        assert_eq!(resolved.extension, "neat");
        assert_eq!(resolved.out_extension, "js");
    }

    #[test]
    fn test_extension_dot_is_optional() {
        let options = CompilerOptions {
            extension: Some(".nt".to_string()),
            ..Default::default()
        };
        assert_eq!(options.resolve().extension, "nt");
    }
}
