//! tracing subscriber for the binary.

use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`.
///
/// Without `RUST_LOG` the level is `info` (`debug` when `verbose`). Logs go to stderr so the
/// answer on stdout can be piped. Calling it twice is harmless.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
