use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

/// Initializes the logging system with both console and file output.
///
/// The console layer writes to stderr because stdout may carry the merged
/// table. The returned guard must live until exit so file logs are flushed.
pub fn init_logging(log_dir: &str) -> WorkerGuard {
    // Ensure logs directory exists
    let _ = fs::create_dir_all(log_dir);

    // Create a non-blocking file appender for daily log rotation
    let file_appender = tracing_appender::rolling::daily(log_dir, "household_merge.log");
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    // Create a JSON layer for file logging
    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    // Create a formatted layer for console logging
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "household_merge=info".parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    // Set the global default subscriber
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}
