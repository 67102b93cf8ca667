//! Console subscriber for hosts without their own `tracing` setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use super::TracingConfig;

#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    #[error("Tracing subscriber initialization failed: {0}")]
    Init(String),
}

/// Installs a global fmt subscriber. `RUST_LOG` overrides the configured level.
pub fn init_tracing_subscriber(config: &TracingConfig) -> Result<(), SubscriberError> {
    if !config.enabled {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_filter()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(config.with_target)
        .with_thread_ids(false)
        .with_file(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| SubscriberError::Init(format!("Failed to init subscriber: {}", e)))
}
