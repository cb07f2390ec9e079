use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Verbosity follows `RUST_LOG` (defaults to `warn`). Output goes to stderr
/// so it does not interleave with interactive prompts on stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
