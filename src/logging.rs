//! Logger bootstrap for embedding binaries.

/// Initialize env_logger with an `info` default. Safe to call more than
/// once; later calls are no-ops.
pub fn init() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .try_init();
}
