//! Logging configuration using tracing

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging to stderr
///
/// Level is controlled by `KISAN_MITRA_LOG`; `--verbose` raises the default
/// to debug.
///
/// # Examples
/// ```bash
/// KISAN_MITRA_LOG=debug kisan-mitra reports
/// ```
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "kisan_mitra=debug,warn"
    } else {
        "kisan_mitra=info,warn"
    };
    let env_filter = EnvFilter::try_from_env("KISAN_MITRA_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_timer(fmt::time::ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string())),
        )
        .try_init();
}
