//! Logging setup using tracing + tracing-subscriber
//!
//! The engine itself only emits `tracing` events; embedders that do not
//! already install a subscriber can call [`init`] with their
//! [`LoggingSettings`]. `RUST_LOG` overrides the configured level for
//! specific modules as usual.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingSettings;
use crate::error::{Error, Result};

/// Initialize logging from engine settings.
pub fn init(settings: &LoggingSettings) -> Result<()> {
    init_simple(parse_level(&settings.level))
}

/// Minimal logging initialization at an explicit level.
pub fn init_simple(level: Level) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Parse a log level string
fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
