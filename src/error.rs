//! Error types for the persona-tags engine
//!
//! Every failure is handled locally: the failing operation aborts, prior
//! state stays intact, and independent operations keep working. Nothing in
//! this taxonomy is fatal to the host application, and no error value ever
//! crosses the host trait boundary — the controller logs and swallows.
//!
//! Stale tag references (an assignment or filter id whose tag left the
//! catalog) are deliberately *not* an error variant: lookups skip them with
//! a debug log, per the defensive-read policy of the store.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Validation Errors
    // ─────────────────────────────────────────────────────────────

    /// Tag creation was asked for a name that trims to nothing
    #[error("Tag name must not be empty")]
    EmptyTagName,

    // ─────────────────────────────────────────────────────────────
    // Host Errors
    // ─────────────────────────────────────────────────────────────

    /// A host-provided UI anchor the presenter needs is absent
    #[error("Required host element missing: {anchor}")]
    MissingHostElement { anchor: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Generic IO error (config file reads)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings (de)serialization error
    #[error("Settings serialization error: {0}")]
    Settings(#[from] serde_json::Error),
}

impl Error {
    /// Create a missing-host-element error for a named anchor
    pub fn missing_host_element(anchor: impl Into<String>) -> Self {
        Error::MissingHostElement {
            anchor: anchor.into(),
        }
    }

    /// Create a config parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Error::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Whether the operation that produced this error can simply be retried
    /// later without repair (the UI degrades instead of crashing)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::EmptyTagName | Error::MissingHostElement { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyTagName;
        assert_eq!(err.to_string(), "Tag name must not be empty");

        let err = Error::missing_host_element("#persona-management-block");
        assert!(err.to_string().contains("#persona-management-block"));
    }

    #[test]
    fn test_error_recoverable() {
        assert!(Error::EmptyTagName.is_recoverable());
        assert!(Error::missing_host_element("#anchor").is_recoverable());
        assert!(!Error::Config("bad".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
