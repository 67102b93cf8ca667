//! Plugin discovery and descriptor normalization.
//!
//! Plugins are directories holding a `plugin.json` descriptor, nested at any
//! depth below the plugin root:
//!
//! ```text
//! frontend/plugins/            (source checkout)
//! ├── system/
//! │   └── dark_theme/
//! │       ├── plugin.json
//! │       └── index.js
//! └── deepseek/
//!     ├── plugin.json      {"name": "DeepSeek", "entry": "main.js"}
//!     └── main.js
//! ```
//!
//! Scanning the tree above yields two descriptors whose `entry` values are
//! `plugins/system/dark_theme/index.js` (marked `system`) and
//! `plugins/deepseek/main.js`. A packaged build looks in `<exe_dir>/plugins`
//! instead.

mod discovery;
mod error;
mod manifest;
mod paths;
mod root;

pub use discovery::{PluginScanner, ScanReport, ScanStats};
pub use error::PluginError;
pub use manifest::{PluginDescriptor, PluginManifest};
pub use root::{LaunchContext, PluginRoot, RootKind};

/// Scans the plugin root of the running process.
///
/// This is the call site that reads the live working directory and
/// executable location; everything below it takes them as parameters.
pub fn load_plugins() -> Result<Vec<PluginDescriptor>, PluginError> {
    PluginScanner::current()?.scan()
}
