//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "LAAS_LOG";

/// Filter used when neither the environment nor `--log-level` says otherwise.
pub const DEFAULT_FILTER: &str = "warn";

/// Install a stderr `fmt` subscriber.
///
/// Precedence: `LAAS_LOG`, then `RUST_LOG`, then `flag`, then [`DEFAULT_FILTER`].
/// An unparsable directive falls through to the next source.
pub fn init_tracing(flag: Option<&str>) {
    let filter = resolve_filter(
        std::env::var(LOG_ENV_VAR).ok().as_deref(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        flag,
    );

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_filter(laas_log: Option<&str>, rust_log: Option<&str>, flag: Option<&str>) -> EnvFilter {
    [laas_log, rust_log, flag]
        .into_iter()
        .flatten()
        .filter(|directive| !directive.trim().is_empty())
        .find_map(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
