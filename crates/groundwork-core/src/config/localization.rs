//! Localization resource configuration.

use serde::{Deserialize, Serialize};

/// Where resource sets live and which cultures are served.
///
/// Resource files are laid out as `<resources_dir>/<set>/<culture>.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizationConfig {
    /// Root directory containing one sub-directory per resource set.
    #[serde(default = "default_resources_dir")]
    pub resources_dir: String,
    /// Shared resource set consulted after the custom set.
    #[serde(default = "default_generic_set")]
    pub generic_set: String,
    /// Application-specific resource set consulted first.
    #[serde(default = "default_custom_set")]
    pub custom_set: String,
    /// Culture used when the caller asks for nothing we support.
    #[serde(default = "default_culture")]
    pub default_culture: String,
    /// Cultures the application answers in.
    #[serde(default = "default_supported_cultures")]
    pub supported_cultures: Vec<String>,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            resources_dir: default_resources_dir(),
            generic_set: default_generic_set(),
            custom_set: default_custom_set(),
            default_culture: default_culture(),
            supported_cultures: default_supported_cultures(),
        }
    }
}

fn default_resources_dir() -> String {
    "resources".to_string()
}

fn default_generic_set() -> String {
    "generic".to_string()
}

fn default_custom_set() -> String {
    "app".to_string()
}

fn default_culture() -> String {
    "en".to_string()
}

fn default_supported_cultures() -> Vec<String> {
    vec!["en".to_string()]
}
