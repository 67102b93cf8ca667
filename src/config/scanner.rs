use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ConfigError, ConfigResult, ValidationErrors};

pub const DEFAULT_DEVELOPMENT_LAYOUT: &str = "frontend/plugins";
pub const DEFAULT_PACKAGED_DIR: &str = "plugins";
pub const DEFAULT_MANIFEST_FILE: &str = "plugin.json";
pub const DEFAULT_ENTRY: &str = "index.js";
pub const DEFAULT_ENTRY_LABEL: &str = "plugins";
pub const DEFAULT_SYSTEM_MARKER: &str = "system";

/// Layout and naming rules used by [`PluginScanner`](crate::plugins::PluginScanner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Plugin root relative to the working directory in a source checkout.
    pub development_layout: PathBuf,
    /// Plugin root relative to the executable's directory when packaged.
    pub packaged_dir: PathBuf,
    /// Exact file name of a plugin descriptor.
    pub manifest_file: String,
    /// Entry point used when a descriptor has no non-empty `entry`.
    pub default_entry: String,
    /// First segment of every rewritten `entry`.
    pub entry_label: String,
    /// Substring of the descriptor path that marks a system plugin.
    pub system_marker: String,
    /// Descend into symlinked directories while walking.
    pub follow_links: bool,
    /// Visit directory entries in file name order.
    pub sort_by_name: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            development_layout: DEFAULT_DEVELOPMENT_LAYOUT.split('/').collect(),
            packaged_dir: PathBuf::from(DEFAULT_PACKAGED_DIR),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
            default_entry: DEFAULT_ENTRY.to_string(),
            entry_label: DEFAULT_ENTRY_LABEL.to_string(),
            system_marker: DEFAULT_SYSTEM_MARKER.to_string(),
            follow_links: false,
            sort_by_name: true,
        }
    }
}

impl ScannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Async variant of [`from_file`](Self::from_file).
    pub async fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn development_layout(mut self, layout: impl Into<PathBuf>) -> Self {
        self.development_layout = layout.into();
        self
    }

    pub fn packaged_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.packaged_dir = dir.into();
        self
    }

    pub fn manifest_file(mut self, name: impl Into<String>) -> Self {
        self.manifest_file = name.into();
        self
    }

    pub fn default_entry(mut self, entry: impl Into<String>) -> Self {
        self.default_entry = entry.into();
        self
    }

    pub fn entry_label(mut self, label: impl Into<String>) -> Self {
        self.entry_label = label.into();
        self
    }

    pub fn system_marker(mut self, marker: impl Into<String>) -> Self {
        self.system_marker = marker.into();
        self
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn sort_by_name(mut self, sort: bool) -> Self {
        self.sort_by_name = sort;
        self
    }

    /// Check every field, reporting all problems at once.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = check_relative_dir("development_layout", &self.development_layout) {
            errors.push(e);
        }
        if let Err(e) = check_relative_dir("packaged_dir", &self.packaged_dir) {
            errors.push(e);
        }
        if let Err(e) = check_file_name("manifest_file", &self.manifest_file) {
            errors.push(e);
        }
        if self.default_entry.trim().is_empty() {
            errors.push(ConfigError::invalid("default_entry", "must not be empty"));
        }
        if let Err(e) = check_file_name("entry_label", &self.entry_label) {
            errors.push(e);
        }
        if self.system_marker.is_empty() {
            errors.push(ConfigError::invalid("system_marker", "must not be empty"));
        }

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ConfigError::ValidationErrors(ValidationErrors(errors))),
        }
    }
}

fn check_relative_dir(key: &str, path: &Path) -> ConfigResult<()> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::invalid(key, "must not be empty"));
    }
    if path
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(ConfigError::invalid(
            key,
            format!("'{}' must be a plain relative path", path.display()),
        ));
    }
    Ok(())
}

fn check_file_name(key: &str, name: &str) -> ConfigResult<()> {
    if name.is_empty() {
        return Err(ConfigError::invalid(key, "must not be empty"));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ConfigError::invalid(
            key,
            format!("'{}' must be a single path segment", name),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = ScannerConfig::default();
        assert_eq!(
            config.development_layout,
            Path::new("frontend").join("plugins")
        );
        assert_eq!(config.packaged_dir, PathBuf::from("plugins"));
        assert_eq!(config.manifest_file, "plugin.json");
        assert_eq!(config.default_entry, "index.js");
        assert_eq!(config.entry_label, "plugins");
        assert_eq!(config.system_marker, "system");
        assert!(!config.follow_links);
        assert!(config.sort_by_name);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let config = ScannerConfig::new()
            .development_layout("web/extensions")
            .packaged_dir("extensions")
            .manifest_file("extension.json")
            .default_entry("main.js")
            .entry_label("extensions")
            .system_marker("builtin")
            .follow_links(true)
            .sort_by_name(false);

        assert_eq!(config.packaged_dir, PathBuf::from("extensions"));
        assert_eq!(config.manifest_file, "extension.json");
        assert_eq!(config.system_marker, "builtin");
        assert!(config.follow_links);
        assert!(!config.sort_by_name);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_single_error() {
        let err = ScannerConfig::new().entry_label("").validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "entry_label"));
    }

    #[test]
    fn test_validate_collects_errors() {
        let err = ScannerConfig::new()
            .manifest_file("nested/plugin.json")
            .packaged_dir("/abs/plugins")
            .development_layout("../escape")
            .system_marker("")
            .validate()
            .unwrap_err();

        match err {
            ConfigError::ValidationErrors(errors) => assert_eq!(errors.0.len(), 4),
            other => panic!("expected ValidationErrors, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_partial() {
        let config = ScannerConfig::from_json(r#"{"entry_label": "addons"}"#).unwrap();
        assert_eq!(config.entry_label, "addons");
        assert_eq!(config.manifest_file, "plugin.json");
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            ScannerConfig::from_json("not json"),
            Err(ConfigError::Serialization(_))
        ));
        assert!(matches!(
            ScannerConfig::from_json(r#"{"default_entry": " "}"#),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scanner.json");
        std::fs::write(&path, r#"{"system_marker": "core", "sort_by_name": false}"#).unwrap();

        let config = ScannerConfig::from_file(&path).unwrap();
        assert_eq!(config.system_marker, "core");
        assert!(!config.sort_by_name);

        let missing = ScannerConfig::from_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }

    #[tokio::test]
    async fn test_load_async() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scanner.json");
        tokio::fs::write(&path, r#"{"packaged_dir": "bundled"}"#)
            .await
            .unwrap();

        let config = ScannerConfig::load(&path).await.unwrap();
        assert_eq!(config.packaged_dir, PathBuf::from("bundled"));
    }
}
