//! Resource sets loaded from per-culture JSON files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use groundwork_core::error::AppError;
use groundwork_core::message::codes;
use groundwork_core::result::AppResult;

use crate::culture::Culture;

/// A named set of localized strings, keyed by culture then by name.
#[derive(Debug, Clone, Default)]
pub struct ResourceSet {
    name: String,
    cultures: HashMap<Culture, HashMap<String, String>>,
}

impl ResourceSet {
    /// Load `<dir>/<name>/<culture>.json`, one flat string map per file.
    ///
    /// A missing set directory yields an empty set. Files that are not
    /// JSON string maps are an error.
    pub fn load(dir: impl AsRef<Path>, name: &str) -> AppResult<Self> {
        let set_dir = dir.as_ref().join(name);
        if !set_dir.is_dir() {
            warn!(set = name, path = %set_dir.display(), "Resource set directory not found");
            return Ok(Self::from_map(name, HashMap::new()));
        }

        let mut cultures = HashMap::new();
        for entry in fs::read_dir(&set_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let raw = fs::read_to_string(&path)?;
            let strings: HashMap<String, String> = serde_json::from_str(&raw).map_err(|e| {
                AppError::with_source(
                    codes::SERVER_ERROR,
                    format!("Invalid resource file {}", path.display()),
                    e,
                )
            })?;
            debug!(set = name, culture = stem, entries = strings.len(), "Loaded resources");
            cultures.insert(Culture::new(stem), strings);
        }

        Ok(Self {
            name: name.to_string(),
            cultures,
        })
    }

    /// Build a set from in-memory maps keyed by culture name.
    pub fn from_map(name: &str, cultures: HashMap<String, HashMap<String, String>>) -> Self {
        Self {
            name: name.to_string(),
            cultures: cultures
                .into_iter()
                .map(|(culture, strings)| (Culture::new(&culture), strings))
                .collect(),
        }
    }

    /// Set name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up `key` for exactly `culture`, without fallback.
    pub fn get(&self, culture: &Culture, key: &str) -> Option<&str> {
        self.cultures
            .get(culture)
            .and_then(|strings| strings.get(key))
            .map(String::as_str)
    }

    /// All strings for exactly `culture`.
    pub fn strings(&self, culture: &Culture) -> Option<&HashMap<String, String>> {
        self.cultures.get(culture)
    }

    /// Cultures present in the set.
    pub fn cultures(&self) -> impl Iterator<Item = &Culture> {
        self.cultures.keys()
    }
}
