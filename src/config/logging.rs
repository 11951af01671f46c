use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init();
}
