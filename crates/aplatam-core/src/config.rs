// crates/aplatam-core/src/config.rs
use crate::loader::{default_data_dir, DEFAULT_CATALOG_FILENAME};
use crate::location::SELECTION_KEY;
use std::path::PathBuf;

/// CSS class of the navigation bar whose height is taken off the map.
pub const DEFAULT_NAVBAR_CLASS: &str = "navbar";

/// Site languages; the first one is the default.
pub const DEFAULT_LANGUAGES: [&str; 2] = ["es", "en"];

pub const ENV_DATA_DIR: &str = "APLATAM_DATA_DIR";
pub const ENV_SELECTION_KEY: &str = "APLATAM_SELECTION_KEY";
pub const ENV_NAVBAR_CLASS: &str = "APLATAM_NAVBAR_CLASS";

/// Settings shared by every front-end of the map view.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Query key carrying the requested city id.
    pub selection_key: String,
    /// Class of the element whose height is taken off the map.
    pub navbar_class: String,
    pub languages: Vec<String>,
    pub data_dir: PathBuf,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            selection_key: SELECTION_KEY.to_string(),
            navbar_class: DEFAULT_NAVBAR_CLASS.to_string(),
            languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            data_dir: default_data_dir(),
        }
    }
}

impl MapConfig {
    /// Defaults, overridden by `APLATAM_DATA_DIR`, `APLATAM_SELECTION_KEY`
    /// and `APLATAM_NAVBAR_CLASS` when set to non-empty values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();
        if let Some(dir) = non_empty(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(key) = non_empty(ENV_SELECTION_KEY) {
            config.selection_key = key;
        }
        if let Some(class) = non_empty(ENV_NAVBAR_CLASS) {
            config.navbar_class = class;
        }
        config
    }

    pub fn with_selection_key(mut self, key: impl Into<String>) -> Self {
        self.selection_key = key.into();
        self
    }

    pub fn with_navbar_class(mut self, class: impl Into<String>) -> Self {
        self.navbar_class = class.into();
        self
    }

    /// Path of the catalog inside `data_dir`.
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(DEFAULT_CATALOG_FILENAME)
    }

    pub fn default_language(&self) -> &str {
        self.languages
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_LANGUAGES[0])
    }

    pub fn is_supported_language(&self, lang: &str) -> bool {
        self.languages.iter().any(|l| l.eq_ignore_ascii_case(lang))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MapConfig::default();
        assert_eq!(config.selection_key, "id");
        assert_eq!(config.navbar_class, "navbar");
        assert_eq!(config.default_language(), "es");
        assert!(config.is_supported_language("EN"));
        assert!(!config.is_supported_language("fr"));
        assert!(config.catalog_path().ends_with("data/cities.json"));
    }

    #[test]
    fn env_overrides_non_empty_values() {
        let config = MapConfig::from_lookup(|key| match key {
            ENV_DATA_DIR => Some("/srv/aplatam".into()),
            ENV_SELECTION_KEY => Some("  ".into()),
            ENV_NAVBAR_CLASS => Some("site-header".into()),
            _ => None,
        });
        assert_eq!(config.data_dir, PathBuf::from("/srv/aplatam"));
        assert_eq!(config.selection_key, "id");
        assert_eq!(config.navbar_class, "site-header");
    }

    #[test]
    fn navbar_class_builder() {
        let config = MapConfig::default().with_navbar_class("topbar");
        assert_eq!(config.navbar_class, "topbar");
        assert_eq!(config.selection_key, "id");
    }
}
