use tracing_subscriber::EnvFilter;

/// Targets that receive log output by default.
const CRATE_TARGETS: &[&str] = &["turma_schedule", "cli", "http"];

/// Initialize tracing from a verbosity level.
///
/// 0 -> warn, 1 -> info, 2 -> debug, 3 and above -> trace.
/// `RUST_LOG` overrides the level when set. Calling this more than once is a no-op.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let default_filter: String = CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
