//! Logging setup shared by both entry points

use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global subscriber
///
/// The level comes from `RUST_LOG` and defaults to `info`. `ansi` should be
/// off where logs are collected as plain text.
pub fn init_tracing(ansi: bool) -> Result<(), SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(ansi)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}
