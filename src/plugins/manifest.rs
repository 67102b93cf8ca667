use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::PluginError;

pub(super) const ENTRY_KEY: &str = "entry";
pub(super) const SYSTEM_KEY: &str = "system";

/// Raw content of a `plugin.json` file.
///
/// Only `entry` is interpreted; every other key is carried as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginManifest {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl PluginManifest {
    pub fn load(path: &Path) -> Result<Self, PluginError> {
        let bytes = std::fs::read(path).map_err(|source| PluginError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &bytes)
    }

    pub fn parse(path: &Path, bytes: &[u8]) -> Result<Self, PluginError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| PluginError::InvalidManifest {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        match value {
            Value::Object(fields) => Ok(Self {
                path: path.to_path_buf(),
                fields,
            }),
            _ => Err(PluginError::NotAnObject {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The declared entry point, if it is a non-empty string.
    pub fn entry(&self) -> Option<&str> {
        self.fields
            .get(ENTRY_KEY)
            .and_then(Value::as_str)
            .filter(|entry| !entry.is_empty())
    }

    pub fn entry_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.entry().unwrap_or(default)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub(super) fn into_parts(self) -> (PathBuf, Map<String, Value>) {
        (self.path, self.fields)
    }
}

/// A discovered plugin with its entry point rewritten relative to the
/// plugin root.
///
/// Serializes as one flat object: `entry`, `system`, then every other key of
/// the source manifest in its original order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub(crate) entry: String,
    pub(crate) system: bool,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
    #[serde(skip)]
    pub(crate) manifest_path: PathBuf,
}

impl PluginDescriptor {
    pub(crate) fn new(manifest: PluginManifest, entry: String, system: bool) -> Self {
        let (manifest_path, mut extra) = manifest.into_parts();
        extra.remove(ENTRY_KEY);
        extra.remove(SYSTEM_KEY);
        Self {
            entry,
            system,
            extra,
            manifest_path,
        }
    }

    /// Entry point as `<label>/<relative/path>`, always with `/` separators.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn is_system(&self) -> bool {
        self.system
    }

    /// A passthrough field. `entry` and `system` have typed accessors instead.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.get("version").and_then(Value::as_str)
    }

    /// Location of the `plugin.json` this descriptor was read from.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    pub fn plugin_dir(&self) -> Option<&Path> {
        self.manifest_path.parent()
    }

    pub fn into_value(self) -> Value {
        let mut object = Map::with_capacity(self.extra.len() + 2);
        object.insert(ENTRY_KEY.to_string(), Value::String(self.entry));
        object.insert(SYSTEM_KEY.to_string(), Value::Bool(self.system));
        object.extend(self.extra);
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn manifest(content: &str) -> Result<PluginManifest, PluginError> {
        PluginManifest::parse(Path::new("/plugins/test/plugin.json"), content.as_bytes())
    }

    #[test]
    fn test_manifest_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plugin.json");
        std::fs::write(&path, r#"{"name":"test-plugin","entry":"main.js"}"#).unwrap();

        let manifest = PluginManifest::load(&path).unwrap();
        assert_eq!(manifest.path(), path);
        assert_eq!(manifest.entry(), Some("main.js"));
        assert_eq!(manifest.fields()["name"], "test-plugin");
    }

    #[test]
    fn test_manifest_not_found() {
        let dir = tempdir().unwrap();
        let err = PluginManifest::load(&dir.path().join("plugin.json")).unwrap_err();
        assert!(matches!(err, PluginError::Read { .. }));
    }

    #[test]
    fn test_manifest_invalid_json() {
        let err = manifest("not json").unwrap_err();
        assert!(matches!(err, PluginError::InvalidManifest { .. }));
    }

    #[test]
    fn test_manifest_non_object() {
        for content in ["[1, 2]", "\"plugin\"", "42", "null"] {
            let err = manifest(content).unwrap_err();
            assert!(matches!(err, PluginError::NotAnObject { .. }), "{content}");
        }
    }

    #[test]
    fn test_manifest_entry_fallback() {
        assert_eq!(manifest("{}").unwrap().entry(), None);
        assert_eq!(manifest(r#"{"entry": ""}"#).unwrap().entry(), None);
        assert_eq!(manifest(r#"{"entry": 7}"#).unwrap().entry(), None);
        assert_eq!(
            manifest(r#"{"entry": null}"#).unwrap().entry_or("index.js"),
            "index.js"
        );
        assert_eq!(
            manifest(r#"{"entry": "app.js"}"#).unwrap().entry_or("index.js"),
            "app.js"
        );
    }

    #[test]
    fn test_descriptor_replaces_entry_and_system() {
        let manifest =
            manifest(r#"{"entry":"x.js","system":"nope","name":"Foo","version":2}"#).unwrap();
        let descriptor = PluginDescriptor::new(manifest, "plugins/test/x.js".into(), false);

        assert_eq!(descriptor.entry(), "plugins/test/x.js");
        assert!(!descriptor.is_system());
        assert!(descriptor.get("entry").is_none());
        assert!(descriptor.get("system").is_none());
        assert_eq!(descriptor.name(), Some("Foo"));
        assert_eq!(descriptor.get("version"), Some(&json!(2)));
        assert_eq!(descriptor.version(), None);
        assert_eq!(
            descriptor.plugin_dir(),
            Some(Path::new("/plugins/test"))
        );
    }

    #[test]
    fn test_descriptor_serializes_flat() {
        let manifest = manifest(r#"{"name":"Foo","tags":["a","b"],"meta":{"k":1}}"#).unwrap();
        let descriptor = PluginDescriptor::new(manifest, "plugins/test/index.js".into(), true);

        let value = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(
            value,
            json!({
                "entry": "plugins/test/index.js",
                "system": true,
                "name": "Foo",
                "tags": ["a", "b"],
                "meta": {"k": 1}
            })
        );
        assert_eq!(descriptor.into_value(), value);
    }

    #[test]
    fn test_descriptor_preserves_key_order() {
        let manifest = manifest(r#"{"zeta":1,"alpha":2,"mid":3}"#).unwrap();
        let descriptor = PluginDescriptor::new(manifest, "plugins/test/index.js".into(), false);

        let keys: Vec<&str> = descriptor.extra().keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }
}
