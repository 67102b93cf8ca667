use std::path::PathBuf;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Failed to determine launch context: {message}")]
    LaunchContext {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read plugin manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid plugin manifest at {path}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },

    #[error("Plugin manifest at {path} is not a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("Failed to walk plugin directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid scanner configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Plugin scan task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl PluginError {
    /// Manifest file this error is attached to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            PluginError::Read { path, .. }
            | PluginError::InvalidManifest { path, .. }
            | PluginError::NotAnObject { path } => Some(path),
            PluginError::Walk(err) => err.path(),
            PluginError::LaunchContext { .. }
            | PluginError::Config(_)
            | PluginError::TaskJoin(_) => None,
        }
    }

    /// Whether the error only affects a single plugin and the scan can go on.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            PluginError::LaunchContext { .. } | PluginError::Config(_) | PluginError::TaskJoin(_)
        )
    }
}
