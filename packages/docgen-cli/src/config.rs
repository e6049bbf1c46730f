// Registry Configuration
//
// Deserialized from a JSON config file at the project root. Consumed, not
// produced, by the pipeline.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryConfig {
    /// Registry root, relative to the project root.
    pub global_path: String,
    /// Subfolder roles under the registry root.
    pub paths: RegistryPaths,
    /// Output filename for per-folder definition files.
    pub definition_file: String,
    /// Folder names excluded from scanning.
    pub skip_subfolders: Vec<String>,
    /// Default author written into metadata when a file declares none.
    pub author: String,
    pub homepage: String,
    /// Maps a registry item type to its documentation output directory,
    /// e.g. `"registry:ui" -> "content/2.components"`.
    pub type_mapping: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryPaths {
    pub ui: String,
    pub blocks: String,
    pub composables: String,
}

impl Default for RegistryPaths {
    fn default() -> Self {
        Self {
            ui: "ui".to_string(),
            blocks: "blocks".to_string(),
            composables: "composables".to_string(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            global_path: "registry/new-york".to_string(),
            paths: RegistryPaths::default(),
            definition_file: "assemblerjs.json".to_string(),
            skip_subfolders: vec!["node_modules".to_string(), ".nuxt".to_string()],
            author: String::new(),
            homepage: String::new(),
            type_mapping: HashMap::from([
                ("registry:ui".to_string(), "content/2.components".to_string()),
                ("registry:block".to_string(), "content/3.blocks".to_string()),
                ("registry:hook".to_string(), "content/4.composables".to_string()),
            ]),
        }
    }
}

impl RegistryConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: RegistryConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if present, else fall back to defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Absolute registry root for a given project root.
    pub fn registry_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.global_path)
    }

    /// The scan roots with their registry item types, in scan order.
    pub fn scan_roots(&self, project_root: &Path) -> Vec<(PathBuf, &'static str)> {
        let root = self.registry_root(project_root);
        vec![
            (root.join(&self.paths.ui), "registry:ui"),
            (root.join(&self.paths.blocks), "registry:block"),
            (root.join(&self.paths.composables), "registry:hook"),
        ]
    }

    /// Documentation output directory for an item type, if mapped.
    pub fn doc_dir(&self, item_type: &str) -> Option<&str> {
        self.type_mapping.get(item_type).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.definition_file, "assemblerjs.json");
        assert_eq!(config.paths.ui, "ui");
        assert!(config.doc_dir("registry:ui").is_some());
    }

    #[test]
    fn test_partial_config_parses() {
        let config: RegistryConfig = serde_json::from_str(
            r#"{ "globalPath": "registry/default", "skipSubfolders": ["wip"] }"#,
        )
        .unwrap();
        assert_eq!(config.global_path, "registry/default");
        assert_eq!(config.skip_subfolders, vec!["wip".to_string()]);
        // Unspecified fields keep their defaults.
        assert_eq!(config.definition_file, "assemblerjs.json");
    }
}
