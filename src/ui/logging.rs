//! Diagnostic logging
//!
//! Stage-by-stage events go through `tracing` to stderr. Quiet by default so
//! the run summary stays readable; `--verbose` or `RUST_LOG` opens it up.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber; later calls are no-ops
pub fn init_tracing(verbose: bool) {
  let level = if verbose { Level::DEBUG } else { Level::WARN };
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

  tracing_subscriber::registry()
    .with(env_filter)
    .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
    .try_init()
    .ok();
}
