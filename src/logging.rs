use error_stack::{Result, ResultExt};
use std::io::{self, IsTerminal};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

#[derive(Debug, Error)]
#[error("Failed to initialize tracing")]
pub struct TracingInitError;

/// Installs the global subscriber. Events go to stderr so that stdout
/// only ever carries JSON output.
pub fn init(targets: &str) -> Result<(), TracingInitError> {
    let filter = make_env_filter(std::env::var("RUST_LOG").ok(), targets);
    let console = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal());

    let registry = tracing_subscriber::Registry::default()
        .with(filter)
        .with(console);

    tracing::subscriber::set_global_default(registry)
        .change_context(TracingInitError)
        .attach_printable("already initialized tracing")
}

fn make_env_filter(rust_log: Option<String>, targets: &str) -> EnvFilter {
    let targets = rust_log.unwrap_or_else(|| targets.to_owned());
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(targets)
}
