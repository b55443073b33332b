//! neatc: The neat compiler CLI.
//!
//! Usage:
//!   neatc [options] [file...]
//!   neatc --dir SRC --out-dir DEST
//!
//! Exit status is 0 on success, 1 for usage and I/O errors and 2 when any
//! file fails to compile.

mod report;
mod tracing_config;

use clap::Parser as ClapParser;
use neat_compiler::BatchError;
use neat_options::{CompilerOptions, ResolvedOptions};
use report::{print_diagnostic, print_error};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

const EXIT_OK: i32 = 0;
const EXIT_USAGE: i32 = 1;
const EXIT_COMPILE: i32 = 2;

#[derive(ClapParser, Debug)]
#[command(name = "neatc", version, about = "Compile neat sources to JavaScript")]
struct Cli {
    /// Source files to compile.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Compile every source file under this directory.
    #[arg(long, value_name = "SRC", conflicts_with = "files")]
    dir: Option<PathBuf>,

    /// Write outputs here instead of next to their sources.
    #[arg(short = 'o', long = "out-dir", value_name = "DEST")]
    out_dir: Option<PathBuf>,

    /// Print compiled files to stdout.
    #[arg(long, conflicts_with = "out_dir")]
    stdout: bool,

    /// Path to a neat.json project file.
    #[arg(short = 'p', long = "project", value_name = "FILE")]
    project: Option<PathBuf>,
}

fn main() {
    tracing_config::init_tracing();
    let cli = Cli::parse();
    process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let options = match resolve_options(cli) {
        Ok(options) => options,
        Err(code) => return code,
    };

    if !cli.files.is_empty() {
        return compile_files(cli, &options);
    }
    if cli.dir.is_some() || cli.project.is_some() {
        if cli.stdout {
            print_error("--stdout cannot be used with a directory compile");
            return EXIT_USAGE;
        }
        return compile_tree(&options);
    }

    print_error("no input files");
    EXIT_USAGE
}

/// Project file values, overridden by flags.
fn resolve_options(cli: &Cli) -> Result<ResolvedOptions, i32> {
    let (file_options, base) = match &cli.project {
        Some(project) => match neat_options::parse_config_file(project) {
            Ok(config) => {
                let base = project
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                (config.options(), Some(base))
            }
            Err(e) => {
                print_error(&e.to_string());
                return Err(EXIT_USAGE);
            }
        },
        None => (CompilerOptions::default(), None),
    };

    let mut resolved = file_options.resolve();
    if let Some(base) = base {
        resolved = resolved.relative_to(&base);
    }
    if let Some(dir) = &cli.dir {
        resolved.root_dir = dir.clone();
    }
    if let Some(out_dir) = &cli.out_dir {
        resolved.out_dir = out_dir.clone();
    }
    tracing::debug!(?resolved, "options");
    Ok(resolved)
}

fn compile_files(cli: &Cli, options: &ResolvedOptions) -> i32 {
    let mut exit_code = EXIT_OK;
    for path in &cli.files {
        let code = compile_one(cli, options, path);
        exit_code = exit_code.max(code);
    }
    exit_code
}

fn compile_one(cli: &Cli, options: &ResolvedOptions, path: &Path) -> i32 {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            print_error(&format!("cannot read '{}': {}", path.display(), e));
            return EXIT_USAGE;
        }
    };

    let output = match neat_compiler::compile(&path.display().to_string(), &source) {
        Ok(output) => output,
        Err(diagnostic) => {
            print_diagnostic(&diagnostic, &source);
            return EXIT_COMPILE;
        }
    };

    if cli.stdout {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(output.as_bytes()) {
            print_error(&format!("cannot write to stdout: {}", e));
            return EXIT_USAGE;
        }
        return EXIT_OK;
    }

    let target = output_path(path, cli.out_dir.as_deref(), options);
    if let Err(e) = std::fs::write(&target, output) {
        print_error(&format!("cannot write '{}': {}", target.display(), e));
        return EXIT_USAGE;
    }
    tracing::debug!(to = %target.display(), "wrote");
    EXIT_OK
}

/// Where a single compiled file goes: beside its source, or into `out_dir`.
fn output_path(path: &Path, out_dir: Option<&Path>, options: &ResolvedOptions) -> PathBuf {
    let beside = options.output_path(path);
    match (out_dir, beside.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => beside,
    }
}

fn compile_tree(options: &ResolvedOptions) -> i32 {
    match neat_compiler::compile_project(options) {
        Ok(written) => {
            tracing::info!(count = written.len(), "compiled");
            EXIT_OK
        }
        Err(BatchError::Compile(diagnostics)) => {
            for diagnostic in diagnostics.diagnostics() {
                match std::fs::read_to_string(&diagnostic.file) {
                    Ok(source) => print_diagnostic(diagnostic, &source),
                    Err(_) => eprintln!("{}", diagnostic),
                }
            }
            eprintln!(
                "\nFound {} error{}.",
                diagnostics.len(),
                if diagnostics.len() == 1 { "" } else { "s" }
            );
            EXIT_COMPILE
        }
        Err(e) => {
            print_error(&e.to_string());
            EXIT_USAGE
        }
    }
}
