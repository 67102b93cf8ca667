//! # plugin-scanner
//!
//! Discovers `plugin.json` descriptors on disk and normalizes them for a host
//! application.
//!
//! The plugin root is `<cwd>/frontend/plugins` when running from a source
//! checkout and `<exe_dir>/plugins` otherwise. Each descriptor found below it
//! has its `entry` rewritten to `plugins/<path relative to the root>` and
//! gains a `system` flag. Descriptors that cannot be read or parsed are
//! skipped without failing the scan.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! fn main() -> Result<(), plugin_scanner::Error> {
//!     for plugin in plugin_scanner::load_plugins()? {
//!         println!("{} (system: {})", plugin.entry(), plugin.is_system());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Injected Launch Context
//!
//! ```rust,no_run
//! use plugin_scanner::{LaunchContext, PluginScanner, ScannerConfig};
//!
//! # fn main() -> Result<(), plugin_scanner::Error> {
//! let context = LaunchContext::new("/home/dev/app", "/home/dev/app/target/debug");
//! let report = PluginScanner::new(context)
//!     .config(ScannerConfig::default())
//!     .scan_report()?;
//!
//! println!("root: {} ({})", report.root.path().display(), report.root.kind());
//! for skipped in &report.skipped {
//!     eprintln!("skipped: {}", skipped);
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod observability;
pub mod plugins;
pub mod prelude;

pub use config::{ConfigError, ScannerConfig};
pub use plugins::{
    LaunchContext, PluginDescriptor, PluginError, PluginManifest, PluginRoot, PluginScanner,
    RootKind, ScanReport, ScanStats, load_plugins,
};

/// Error type for plugin-scanner operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The scan could not be performed.
    #[error("Plugin scan failed: {0}")]
    Plugin(#[from] PluginError),

    /// Invalid or unreadable scanner configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::Plugin(PluginError::Config(_))
        )
    }
}

/// Result type alias for plugin-scanner operations.
pub type Result<T> = std::result::Result<T, Error>;
