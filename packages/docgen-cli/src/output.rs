// Artifact Output
//
// Writes the per-folder definition files, the aggregated registry.json,
// and the Markdown documentation tree. All JSON goes through serde_json
// with insertion order preserved, so unchanged input produces
// byte-identical output.

use crate::config::RegistryConfig;
use crate::logging::Logger;
use registry_docgen::entities::{ComponentMetadata, DependencyMapEntry, RegistryItem};
use registry_docgen::markdown::{self, DocKind, SourceSnippet};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Write a folder's definition file.
pub fn write_definition(folder: &Path, config: &RegistryConfig, item: &RegistryItem) -> anyhow::Result<PathBuf> {
    let path = folder.join(&config.definition_file);
    write_json(&path, item)?;
    Ok(path)
}

/// Write the Markdown documentation page for one item. Returns `None`
/// when the item type has no documentation directory mapped.
pub fn write_markdown(
    project_root: &Path,
    config: &RegistryConfig,
    item_type: &str,
    meta: &ComponentMetadata,
    deps: Option<&DependencyMapEntry>,
    snippets: &[SourceSnippet],
) -> anyhow::Result<Option<PathBuf>> {
    let Some(doc_dir) = config.doc_dir(item_type) else {
        return Ok(None);
    };

    let kind = if item_type == "registry:hook" {
        DocKind::Composable
    } else {
        DocKind::Component
    };

    let mut dir = project_root.join(doc_dir);
    if !meta.category.is_empty() {
        dir = dir.join(&meta.category);
    }
    fs::create_dir_all(&dir)?;

    let path = dir.join(format!("{}.md", meta.name));
    let document = markdown::render(kind, meta, deps, snippets);
    fs::write(&path, document)?;
    Ok(Some(path))
}

/// The aggregated registry file.
#[derive(Debug, Serialize)]
pub struct Registry {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub homepage: String,
    pub items: Vec<serde_json::Value>,
}

/// Collect every definition file under the scan roots into
/// `registry.json`.
///
/// Duplicate item names are skipped with a warning; the first occurrence
/// in scan order wins.
pub fn aggregate_registry(
    project_root: &Path,
    config: &RegistryConfig,
    logger: &dyn Logger,
) -> anyhow::Result<Registry> {
    let mut items: Vec<serde_json::Value> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for (root, _item_type) in config.scan_roots(project_root) {
        if !root.is_dir() {
            logger.warn(&format!("missing directory: {}", root.display()));
            continue;
        }

        for folder in subfolders(&root, &config.skip_subfolders) {
            let definition = folder.join(&config.definition_file);
            if !definition.is_file() {
                continue;
            }

            let content = fs::read_to_string(&definition)?;
            let item: serde_json::Value = match serde_json::from_str(&content) {
                Ok(item) => item,
                Err(error) => {
                    logger.warn(&format!("invalid definition {}: {}", definition.display(), error));
                    continue;
                }
            };

            let name = item
                .get("name")
                .and_then(|n| n.as_str())
                .unwrap_or_default()
                .to_string();
            if name.is_empty() {
                logger.warn(&format!("definition without name: {}", definition.display()));
                continue;
            }
            if seen.contains(&name) {
                logger.warn(&format!("duplicate registry item '{}', keeping first", name));
                continue;
            }

            seen.push(name);
            items.push(item);
        }
    }

    Ok(Registry {
        schema: "https://ui.shadcn.com/schema/registry.json".to_string(),
        name: registry_name(config),
        homepage: config.homepage.clone(),
        items,
    })
}

/// Write `registry.json` at the project root.
pub fn write_registry(project_root: &Path, registry: &Registry) -> anyhow::Result<PathBuf> {
    let path = project_root.join("registry.json");
    write_json(&path, registry)?;
    Ok(path)
}

/// Immediate subdirectories in sorted order, exclusions applied.
pub fn subfolders(root: &Path, skip: &[String]) -> Vec<PathBuf> {
    let mut folders = Vec::new();
    let Ok(entries) = fs::read_dir(root) else {
        return folders;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') || skip.iter().any(|s| s == &name) {
            continue;
        }
        folders.push(path);
    }

    folders.sort();
    folders
}

fn registry_name(config: &RegistryConfig) -> String {
    config
        .global_path
        .rsplit('/')
        .next()
        .unwrap_or("registry")
        .to_string()
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_name_from_global_path() {
        let config = RegistryConfig::default();
        assert_eq!(registry_name(&config), "new-york");
    }
}
