//! Scanner configuration.
//!
//! Every layout constant the scanner relies on lives in [`ScannerConfig`].
//! The defaults reproduce the conventional layout, so most hosts never
//! construct one explicitly:
//!
//! ```rust
//! use plugin_scanner::config::ScannerConfig;
//!
//! let config = ScannerConfig::default().entry_label("extensions");
//! assert!(config.validate().is_ok());
//! ```

mod scanner;

pub use scanner::{
    DEFAULT_DEVELOPMENT_LAYOUT, DEFAULT_ENTRY, DEFAULT_ENTRY_LABEL, DEFAULT_MANIFEST_FILE,
    DEFAULT_PACKAGED_DIR, DEFAULT_SYSTEM_MARKER, ScannerConfig,
};

use thiserror::Error;

/// Errors that can occur in configuration operations
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// The key with invalid value
        key: String,
        /// Error message
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Multiple validation errors
    #[error("{0}")]
    ValidationErrors(ValidationErrors),
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct ValidationErrors(pub Vec<ConfigError>);

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation failed: ")?;
        let msgs: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", msgs.join("; "))
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
