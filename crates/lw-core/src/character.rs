use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::attribute::AttrValue;
use crate::error::{LwError, LwResult};

/// Access to a host-owned character record.
///
/// The record is a flat key→value property bag plus a set of opaque,
/// scope-keyed flag blobs. All writes are whole-field overwrites.
pub trait CharacterStore {
    /// Display name of the character.
    fn name(&self) -> &str;

    /// Read a single attribute.
    fn read_attribute(&self, key: &str) -> Option<AttrValue>;

    /// Overwrite a batch of attributes in one update.
    fn write_attributes(&mut self, updates: BTreeMap<String, AttrValue>) -> LwResult<()>;

    /// Read the flag blob stored under `scope`.
    fn read_flag(&self, scope: &str) -> Option<serde_json::Value>;

    /// Replace the flag blob stored under `scope`.
    fn write_flag(&mut self, scope: &str, value: serde_json::Value) -> LwResult<()>;

    /// Read an attribute as a number, using `fallback` when absent or unparseable.
    fn read_number(&self, key: &str, fallback: f64) -> f64 {
        self.read_attribute(key)
            .and_then(|v| v.as_number())
            .unwrap_or(fallback)
    }

    /// Read an attribute as a newline-separated list.
    fn read_lines(&self, key: &str) -> Vec<String> {
        self.read_attribute(key)
            .map(|v| v.as_lines())
            .unwrap_or_default()
    }
}

/// An in-memory character record, serializable as a JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Display name.
    pub name: String,
    /// Attribute property bag.
    #[serde(default)]
    pub attributes: BTreeMap<String, AttrValue>,
    /// Opaque module state, keyed by scope.
    #[serde(default)]
    pub flags: BTreeMap<String, serde_json::Value>,
}

impl Character {
    /// Create a character with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Load a character from a JSON file.
    pub fn load(path: &Path) -> LwResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| LwError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the character to a JSON file, pretty-printed.
    pub fn save(&self, path: &Path) -> LwResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| LwError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl CharacterStore for Character {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_attribute(&self, key: &str) -> Option<AttrValue> {
        self.attributes.get(key).cloned()
    }

    fn write_attributes(&mut self, updates: BTreeMap<String, AttrValue>) -> LwResult<()> {
        self.attributes.extend(updates);
        Ok(())
    }

    fn read_flag(&self, scope: &str) -> Option<serde_json::Value> {
        self.flags.get(scope).cloned()
    }

    fn write_flag(&mut self, scope: &str, value: serde_json::Value) -> LwResult<()> {
        self.flags.insert(scope.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_reads() {
        let c = Character::new("Anna")
            .with_attribute("Inventory_Money", "40")
            .with_attribute("Contacts", "Smith from Danzig (friend)");
        assert_eq!(c.read_number("Inventory_Money", 0.0), 40.0);
        assert_eq!(c.read_number("Missing", 1.0), 1.0);
        assert_eq!(c.read_lines("Contacts").len(), 1);
        assert!(c.read_lines("Missing").is_empty());
    }

    #[test]
    fn batch_write_overwrites() {
        let mut c = Character::new("Anna").with_attribute("A", "1");
        let mut updates = BTreeMap::new();
        updates.insert("A".to_string(), AttrValue::from("2"));
        updates.insert("B".to_string(), AttrValue::from("3"));
        c.write_attributes(updates).unwrap();
        assert_eq!(c.read_attribute("A"), Some(AttrValue::from("2")));
        assert_eq!(c.read_attribute("B"), Some(AttrValue::from("3")));
    }

    #[test]
    fn flags_replace_whole_blob() {
        let mut c = Character::new("Anna");
        c.write_flag("chargen", serde_json::json!({"a": 1})).unwrap();
        c.write_flag("chargen", serde_json::json!({"b": 2})).unwrap();
        assert_eq!(c.read_flag("chargen"), Some(serde_json::json!({"b": 2})));
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anna.json");
        let c = Character::new("Anna").with_attribute("Social_Status", 1i64);
        c.save(&path).unwrap();
        assert_eq!(Character::load(&path).unwrap(), c);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Character::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, LwError::Io { .. }));
    }
}
