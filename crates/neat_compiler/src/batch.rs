//! Directory compiles.

use neat_diagnostics::{Diagnostic, DiagnosticCollection};
use neat_options::ResolvedOptions;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    /// Every file that failed, sorted by file and position.
    #[error("{}", .0.to_message_string())]
    Compile(DiagnosticCollection),
}

enum Outcome {
    Written(PathBuf),
    Failed(Diagnostic),
}

/// Compile every source file under `src` into the mirrored path under `dest`.
///
/// Files that compile are written even when others fail. Returns the written
/// paths in walk order.
pub fn compile_dir(
    src: &Path,
    dest: &Path,
    options: &ResolvedOptions,
) -> Result<Vec<PathBuf>, BatchError> {
    let _span = tracing::info_span!("compile_dir", src = %src.display()).entered();

    let files = discover_sources(src, options)?;
    tracing::debug!(count = files.len(), "discovered sources");

    let outcomes = files
        .par_iter()
        .map(|path| compile_file(path, src, dest, options))
        .collect::<Result<Vec<_>, _>>()?;

    let mut written = Vec::new();
    let mut errors = DiagnosticCollection::new();
    for outcome in outcomes {
        match outcome {
            Outcome::Written(path) => written.push(path),
            Outcome::Failed(diagnostic) => errors.add(diagnostic),
        }
    }

    if !errors.is_empty() {
        tracing::warn!(failed = errors.len(), written = written.len(), "batch failed");
        errors.sort();
        return Err(BatchError::Compile(errors));
    }
    tracing::info!(written = written.len(), "batch complete");
    Ok(written)
}

/// Compile the options' root directory into their output directory.
pub fn compile_project(options: &ResolvedOptions) -> Result<Vec<PathBuf>, BatchError> {
    compile_dir(&options.root_dir, &options.out_dir, options)
}

fn discover_sources(src: &Path, options: &ResolvedOptions) -> Result<Vec<PathBuf>, BatchError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && options.is_source_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn compile_file(
    path: &Path,
    src: &Path,
    dest: &Path,
    options: &ResolvedOptions,
) -> Result<Outcome, BatchError> {
    let source = fs::read_to_string(path).map_err(|source| io_error(path, source))?;

    let output = match crate::compile(&path.display().to_string(), &source) {
        Ok(output) => output,
        Err(diagnostic) => {
            tracing::warn!(%diagnostic, "compile failed");
            return Ok(Outcome::Failed(diagnostic));
        }
    };

    let relative = path.strip_prefix(src).unwrap_or(path);
    let target = options.output_path(&dest.join(relative));
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }
    fs::write(&target, output).map_err(|source| io_error(&target, source))?;
    tracing::debug!(from = %path.display(), to = %target.display(), "wrote");
    Ok(Outcome::Written(target))
}

fn io_error(path: &Path, source: std::io::Error) -> BatchError {
    BatchError::Io {
        path: path.to_path_buf(),
        source,
    }
}
