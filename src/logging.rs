use tracing_subscriber::{EnvFilter, fmt};

/// Install the global tracing subscriber.
///
/// Level comes from `RUST_LOG` (for example `RUST_LOG=care_meal_planner=debug`),
/// defaulting to `warn` so the printed tables stay readable.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Verbose subscriber for tests. Safe to call more than once.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
