use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::PluginError;
use super::manifest::{PluginDescriptor, PluginManifest};
use super::paths;
use super::root::{LaunchContext, PluginRoot, RootKind};
use crate::config::ScannerConfig;
use crate::observability;

#[derive(Debug, Clone)]
enum RootSource {
    Resolve(LaunchContext),
    Fixed(PathBuf),
}

/// Finds every plugin descriptor below the plugin root.
///
/// A descriptor that cannot be read or parsed is skipped and the
/// walk carries on; only failures that prevent the scan as a whole surface
/// as `Err`.
#[derive(Debug, Clone)]
pub struct PluginScanner {
    source: RootSource,
    config: ScannerConfig,
}

impl PluginScanner {
    pub fn new(context: LaunchContext) -> Self {
        Self {
            source: RootSource::Resolve(context),
            config: ScannerConfig::default(),
        }
    }

    /// Scanner bound to the live working directory and executable.
    pub fn current() -> Result<Self, PluginError> {
        Ok(Self::new(LaunchContext::current()?))
    }

    /// Scanner for an explicit root, skipping root resolution.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            source: RootSource::Fixed(root.into()),
            config: ScannerConfig::default(),
        }
    }

    pub fn config(mut self, config: ScannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn scanner_config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn resolve_root(&self) -> PluginRoot {
        match &self.source {
            RootSource::Resolve(context) => PluginRoot::resolve(context, &self.config),
            RootSource::Fixed(path) => PluginRoot::new(path.clone(), RootKind::Explicit),
        }
    }

    pub fn scan(&self) -> Result<Vec<PluginDescriptor>, PluginError> {
        Ok(self.scan_report()?.plugins)
    }

    /// Runs [`scan`](Self::scan) on the blocking thread pool.
    pub async fn scan_async(self) -> Result<Vec<PluginDescriptor>, PluginError> {
        tokio::task::spawn_blocking(move || self.scan()).await?
    }

    /// Like [`scan`](Self::scan), but also returns what was skipped and why.
    pub fn scan_report(&self) -> Result<ScanReport, PluginError> {
        self.config.validate()?;

        let root = self.resolve_root();
        let span = observability::scan_span(root.path(), root.kind());
        let _enter = span.enter();

        let mut report = ScanReport::new(root);
        let root_path = report.root.path().to_path_buf();

        if !root_path.exists() {
            tracing::debug!(root = %root_path.display(), "plugin root does not exist");
            return Ok(report);
        }

        let mut walker = WalkDir::new(&root_path).follow_links(self.config.follow_links);
        if self.config.sort_by_name {
            walker = walker.sort_by_file_name();
        }

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable plugin directory entry");
                    report.skip(PluginError::Walk(e));
                    continue;
                }
            };

            if entry.file_type().is_dir() || !self.is_manifest(entry.file_name()) {
                continue;
            }

            report.stats.manifests_found += 1;
            match self.load_descriptor(&root_path, entry.path()) {
                Ok(descriptor) => {
                    tracing::debug!(
                        entry = descriptor.entry(),
                        system = descriptor.is_system(),
                        "loaded plugin descriptor"
                    );
                    report.stats.loaded += 1;
                    report.plugins.push(descriptor);
                }
                Err(e) => {
                    tracing::warn!("Skipping plugin manifest {}: {}", entry.path().display(), e);
                    report.skip(e);
                }
            }
        }

        tracing::info!(
            loaded = report.stats.loaded,
            skipped = report.skipped.len(),
            "plugin scan complete"
        );
        Ok(report)
    }

    fn is_manifest(&self, name: &OsStr) -> bool {
        name == OsStr::new(&self.config.manifest_file)
    }

    fn load_descriptor(&self, root: &Path, path: &Path) -> Result<PluginDescriptor, PluginError> {
        let manifest = PluginManifest::load(path)?;
        let declared = manifest.entry_or(&self.config.default_entry).to_string();

        let plugin_dir = path.parent().unwrap_or(root);
        let absolute = paths::join_entry(plugin_dir, &declared);
        // An entry climbing above the root is pulled back under the label.
        let relative = paths::relative_path(root, &absolute)
            .map(|relative| paths::clamp_to_base(&relative))
            .unwrap_or_default();

        let entry = match paths::to_slash(&relative) {
            rel if rel.is_empty() => self.config.entry_label.clone(),
            rel => format!("{}/{}", self.config.entry_label, rel),
        };
        let system = path
            .to_string_lossy()
            .contains(self.config.system_marker.as_str());

        Ok(PluginDescriptor::new(manifest, entry, system))
    }
}

/// Outcome of a scan, including the descriptors that were dropped.
#[derive(Debug)]
pub struct ScanReport {
    pub root: PluginRoot,
    pub plugins: Vec<PluginDescriptor>,
    /// Recoverable errors, one per skipped manifest or unreadable entry.
    pub skipped: Vec<PluginError>,
    pub stats: ScanStats,
}

impl ScanReport {
    fn new(root: PluginRoot) -> Self {
        Self {
            root,
            plugins: Vec::new(),
            skipped: Vec::new(),
            stats: ScanStats::default(),
        }
    }

    fn skip(&mut self, error: PluginError) {
        match error {
            PluginError::Walk(_) => self.stats.walk_errors += 1,
            _ => self.stats.skipped += 1,
        }
        self.skipped.push(error);
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Files whose name matched the manifest file name.
    pub manifests_found: usize,
    pub loaded: usize,
    pub skipped: usize,
    pub walk_errors: usize,
}
