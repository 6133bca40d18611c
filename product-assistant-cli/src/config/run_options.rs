//! Optional overrides for a run (CLI args or programmatic).
//!
//! Used by [`RunConfig::apply_options`](super::RunConfig::apply_options) and
//! [`run_with_options`](crate::run_with_options).

use std::path::PathBuf;

/// Optional overrides for a run: session, catalog, timeout, verbosity.
///
/// All fields are optional; only set fields override the base config (from env).
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Session id used as checkpoint thread.
    pub session: Option<String>,
    /// JSON catalog to load into the product index.
    pub catalog: Option<PathBuf>,
    /// Wall-clock limit in seconds; `0` disables it.
    pub timeout_secs: Option<u64>,
    /// Log node enter/exit at debug level.
    pub verbose: bool,
}
