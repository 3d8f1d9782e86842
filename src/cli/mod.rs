/// CLI layer: argument definitions and logging setup.
pub mod args;

pub use args::{PkgCli, RevCli};

use tracing_subscriber::EnvFilter;

/// Initialize stderr logging. The `RUST_LOG` environment variable wins when
/// set; otherwise
/// `--verbose` enables debug-level logging and errors/warnings are shown by
/// default.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "capdiff=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
