//! Plugin root resolution.
//!
//! A source checkout keeps plugins next to the front-end sources, a packaged
//! build ships them beside the executable. [`PluginRoot::resolve`] picks the
//! first layout when it exists on disk and falls back to the second.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::PluginError;
use crate::config::ScannerConfig;

/// Process locations the root is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchContext {
    working_dir: PathBuf,
    executable_dir: PathBuf,
}

impl LaunchContext {
    pub fn new(working_dir: impl Into<PathBuf>, executable_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            executable_dir: executable_dir.into(),
        }
    }

    /// Reads the live working directory and executable location.
    pub fn current() -> Result<Self, PluginError> {
        let working_dir =
            std::env::current_dir().map_err(|source| PluginError::LaunchContext {
                message: "current working directory".into(),
                source,
            })?;
        let executable = std::env::current_exe().map_err(|source| PluginError::LaunchContext {
            message: "current executable".into(),
            source,
        })?;
        let executable_dir = executable
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| working_dir.clone());

        Ok(Self {
            working_dir,
            executable_dir,
        })
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn executable_dir(&self) -> &Path {
        &self.executable_dir
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootKind {
    /// `<cwd>/frontend/plugins` in a source checkout.
    Development,
    /// `<exe_dir>/plugins` next to an installed binary.
    Packaged,
    /// Supplied directly by the caller.
    Explicit,
}

impl RootKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RootKind::Development => "development",
            RootKind::Packaged => "packaged",
            RootKind::Explicit => "explicit",
        }
    }
}

impl std::fmt::Display for RootKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRoot {
    path: PathBuf,
    kind: RootKind,
}

impl PluginRoot {
    pub fn new(path: impl Into<PathBuf>, kind: RootKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn resolve(context: &LaunchContext, config: &ScannerConfig) -> Self {
        let development = context.working_dir.join(&config.development_layout);
        if development.exists() {
            tracing::debug!(root = %development.display(), "using development plugin root");
            return Self::new(development, RootKind::Development);
        }

        let packaged = context.executable_dir.join(&config.packaged_dir);
        tracing::debug!(root = %packaged.display(), "using packaged plugin root");
        Self::new(packaged, RootKind::Packaged)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> RootKind {
        self.kind
    }

    pub fn is_development(&self) -> bool {
        self.kind == RootKind::Development
    }
}
