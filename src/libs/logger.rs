use crate::libs::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "lbi=info";
const DEBUG_FILTER: &str = "lbi=debug,reqwest=info";

/// Installs the global `tracing` subscriber on stderr.
///
/// `RUST_LOG` takes precedence. Without it, pipeline steps log at `info`,
/// or at `debug` when `LBI_DEBUG` is set. Calling this twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_debug_mode() {
            EnvFilter::new(DEBUG_FILTER)
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(is_debug_mode())
        .with_thread_ids(false)
        .try_init();
}
