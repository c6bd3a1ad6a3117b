/// Initialize tracing/logging for the application.
pub fn init(level: tracing::Level) {
    // try_init: tests call this more than once per process
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
