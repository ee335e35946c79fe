//! Translation catalogs.
//!
//! A catalog resolves dotted keys (`validation.attributes.email`) for a
//! language. [`JsonCatalog`] is the on-disk implementation: one directory per
//! language, one JSON file per namespace, the file stem being the first key
//! segment.

use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// A resolved catalog value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A displayable string
    Text(String),
    /// A collection of further entries (not displayable on its own)
    Group,
}

/// Source of translated strings.
pub trait TranslationCatalog {
    /// Look up `key` for `language`.
    fn get(&self, language: &str, key: &str) -> Option<Entry>;

    /// Look up `key`, returning `default` when the key is missing or is a group.
    fn get_or(&self, language: &str, key: &str, default: &str) -> String {
        match self.get(language, key) {
            Some(Entry::Text(text)) => text,
            _ => default.to_string(),
        }
    }
}

/// Errors raised while loading a catalog from disk.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Catalog backed by JSON documents, one tree per language.
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    languages: HashMap<String, Value>,
}

impl JsonCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the tree for a language.
    pub fn with_language(mut self, language: impl Into<String>, tree: Value) -> Self {
        self.languages.insert(language.into(), tree);
        self
    }

    /// Load every `<dir>/<language>/<namespace>.json` file.
    ///
    /// Top-level files and non-JSON files are ignored.
    ///
    /// # Errors
    /// Returns [`CatalogError`] if a directory or file cannot be read, or a
    /// file does not contain valid JSON.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let mut catalog = Self::new();

        for entry in fs::read_dir(dir).map_err(|e| CatalogError::io(dir, e))? {
            let entry = entry.map_err(|e| CatalogError::io(dir, e))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(language) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let tree = load_language_dir(&path)?;
            debug!(language, namespaces = tree.len(), "Loaded catalog language");
            catalog
                .languages
                .insert(language.to_string(), Value::Object(tree));
        }

        info!(
            "Loaded translation catalog for {} languages from {}",
            catalog.languages.len(),
            dir.display()
        );
        Ok(catalog)
    }

    /// Languages present in the catalog, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

fn load_language_dir(dir: &Path) -> Result<serde_json::Map<String, Value>, CatalogError> {
    let mut tree = serde_json::Map::new();

    for entry in fs::read_dir(dir).map_err(|e| CatalogError::io(dir, e))? {
        let path = entry.map_err(|e| CatalogError::io(dir, e))?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(namespace) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let raw = fs::read_to_string(&path).map_err(|e| CatalogError::io(&path, e))?;
        let value: Value = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.clone(),
            source,
        })?;
        tree.insert(namespace.to_string(), value);
    }

    Ok(tree)
}

impl TranslationCatalog for JsonCatalog {
    fn get(&self, language: &str, key: &str) -> Option<Entry> {
        let mut node = self.languages.get(language)?;
        for segment in key.split('.') {
            node = match node {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        match node {
            Value::Null => None,
            Value::String(text) => Some(Entry::Text(text.clone())),
            Value::Bool(b) => Some(Entry::Text(b.to_string())),
            Value::Number(n) => Some(Entry::Text(n.to_string())),
            Value::Array(_) | Value::Object(_) => Some(Entry::Group),
        }
    }
}
