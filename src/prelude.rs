//! Prelude module for convenient imports.
//!
//! ```rust
//! use plugin_scanner::prelude::*;
//! ```

pub use crate::Error;
pub use crate::Result;

pub use crate::config::ScannerConfig;
pub use crate::plugins::{
    LaunchContext, PluginDescriptor, PluginError, PluginRoot, PluginScanner, RootKind, ScanReport,
    load_plugins,
};
