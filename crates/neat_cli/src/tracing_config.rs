//! Tracing setup for `neatc`.
//!
//! ```bash
//! NEAT_LOG=debug neatc src/app.neat
//! NEAT_LOG="neat_compiler=debug" neatc --dir src --out-dir lib
//! ```
//!
//! The subscriber is only installed when `NEAT_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::EnvFilter;

/// `NEAT_LOG` takes precedence over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var("NEAT_LOG") {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global subscriber, writing to stderr.
pub fn init_tracing() {
    let has_neat_log = std::env::var("NEAT_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_neat_log && !has_rust_log {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .init();
}
