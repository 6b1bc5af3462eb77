use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system with env_logger.
///
/// The `verbose` flag controls whether debug logs are shown; `RUST_LOG`
/// overrides either way. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    INIT.call_once(|| {
        let default_filter = if verbose { "clef=debug" } else { "clef=info" };
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(default_filter),
        )
        .format_timestamp_millis()
        .init();
    });
}
