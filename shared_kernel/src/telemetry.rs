use tracing_subscriber::prelude::*;
use tracing_subscriber::Registry;

/// Installs the global `tracing` subscriber for the host application.
/// Filtering comes from `RUST_LOG`; output is structured JSON.
pub fn init_telemetry() {
    // Needed to forward ordinary log statements to our tracing subscriber.
    tracing_log::LogTracer::init().expect("Failed to initialize log tracer");

    let subscriber = Registry::default()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_thread_names(true),
        );

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to install `tracing` subscriber");
}
