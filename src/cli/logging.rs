//! Logger setup. Logs go to stderr; stdout is reserved for command output.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when `RUST_LOG` is unset.
///
/// `-v` steps warn → info → debug → trace. The debug toggle raises the
/// floor to debug without lowering an explicit `-vvv`.
pub fn default_level(verbose: u8, force_debug: bool) -> &'static str {
    let verbose = if force_debug { verbose.max(2) } else { verbose };
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init_logging(verbose: u8, force_debug: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bear_notes={}", default_level(verbose, force_debug))));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("logger already initialized");
    }
}
