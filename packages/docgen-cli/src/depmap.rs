// Dependency Mapping
//
// Builds the folder-to-folder dependency graph. Pass one aggregates each
// scanned folder's internal imports into `dependsOn`; pass two inverts
// the graph into `usedBy`. The mapper owns its per-batch caches and is
// reset between runs instead of relying on process-lifetime globals.

use crate::imports::{extract_file_imports, ImportResolver};
use crate::logging::Logger;
use registry_docgen::entities::{
    DependencyMap, DependencyMapEntry, ImportGroup, ImportInfo, ImportKind,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct DependencyMapper<'log> {
    resolver: ImportResolver,
    logger: &'log dyn Logger,
    /// Per-batch memo of extracted imports, keyed by file path.
    file_imports: HashMap<PathBuf, Vec<ImportInfo>>,
}

impl<'log> DependencyMapper<'log> {
    pub fn new(resolver: ImportResolver, logger: &'log dyn Logger) -> Self {
        Self {
            resolver,
            logger,
            file_imports: HashMap::new(),
        }
    }

    /// Clear per-batch caches. Call between runs when reusing a mapper.
    pub fn reset(&mut self) {
        self.file_imports.clear();
    }

    /// Build the dependency map for a set of component folders.
    ///
    /// Missing directories produce a warning and an empty entry. Files
    /// that fail to parse are warned about and skipped; dependency
    /// mapping stays total even when extraction elsewhere fails.
    pub fn map_folders(&mut self, folders: &[PathBuf]) -> DependencyMap {
        let mut map = DependencyMap::new();

        for folder in folders {
            let key = folder_key(folder);
            let entry = self.map_folder(folder);
            map.insert(key, entry);
        }

        invert_into_used_by(&mut map);
        map
    }

    fn map_folder(&mut self, folder: &Path) -> DependencyMapEntry {
        if !folder.is_dir() {
            self.logger
                .warn(&format!("missing directory: {}", folder.display()));
            return DependencyMapEntry::default();
        }

        let mut entry = DependencyMapEntry::default();

        for file in list_source_files(folder) {
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            entry.files.push(file_name);

            for import in self.imports_of(&file, folder) {
                if import.kind != ImportKind::Internal {
                    continue;
                }
                let Some(relative) = import.relative_path else {
                    continue;
                };
                if entry.depends_on.iter().any(|g| g.path == relative) {
                    continue;
                }
                entry.depends_on.push(ImportGroup {
                    group: group_of(&relative),
                    path: relative,
                });
            }
        }

        entry
    }

    fn imports_of(&mut self, file: &Path, folder: &Path) -> Vec<ImportInfo> {
        if let Some(cached) = self.file_imports.get(file) {
            return cached.clone();
        }

        let imports = match std::fs::read_to_string(file) {
            Ok(source) => {
                let script = script_content(&source, file);
                match extract_file_imports(&script, file, &self.resolver, folder) {
                    Ok(imports) => imports,
                    Err(error) => {
                        self.logger
                            .warn(&format!("skipping {}: {}", file.display(), error));
                        Vec::new()
                    }
                }
            }
            Err(error) => {
                self.logger
                    .warn(&format!("cannot read {}: {}", file.display(), error));
                Vec::new()
            }
        };

        self.file_imports.insert(file.to_path_buf(), imports.clone());
        imports
    }
}

/// The script portion of a file: `.vue` files contribute their script
/// blocks, everything else is script already.
fn script_content(source: &str, file: &Path) -> String {
    if file.extension().map(|e| e == "vue").unwrap_or(false) {
        crate::sfc::parse_sfc(source)
            .script_content()
            .unwrap_or("")
            .to_string()
    } else {
        source.to_string()
    }
}

/// Second pass: for every folder A that depends on folder B, append A to
/// B's `usedBy`. Folders only referenced, never scanned, get a
/// synthesized entry with empty `dependsOn`.
fn invert_into_used_by(map: &mut DependencyMap) {
    let edges: Vec<(String, String)> = map
        .iter()
        .flat_map(|(from, entry)| {
            entry
                .depends_on
                .iter()
                .map(|group| (target_folder(&group.group), from.clone()))
                .collect::<Vec<_>>()
        })
        .collect();

    for (target, user) in edges {
        let entry = map.entry(target).or_default();
        if !entry.used_by.contains(&user) {
            entry.used_by.push(user);
        }
    }
}

/// Folder name a dependency group points at, e.g. `use-foo` for
/// `composables/use-foo`.
fn target_folder(group: &str) -> String {
    group.rsplit('/').next().unwrap_or(group).to_string()
}

/// Top two path segments of a registry-relative path.
fn group_of(relative: &str) -> String {
    relative.split('/').take(2).collect::<Vec<_>>().join("/")
}

fn folder_key(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| folder.display().to_string())
}

/// Source files of a folder, non-recursive, sorted for deterministic
/// output.
pub fn list_source_files(folder: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for pattern in ["*.vue", "*.ts", "*.js"] {
        let full = folder.join(pattern);
        if let Ok(paths) = glob::glob(&full.to_string_lossy()) {
            for path in paths.flatten() {
                if path.is_file() {
                    files.push(path);
                }
            }
        }
    }
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_of() {
        assert_eq!(group_of("composables/use-foo/useFoo.ts"), "composables/use-foo");
        assert_eq!(group_of("ui/button/Button.vue"), "ui/button");
        assert_eq!(group_of("single.ts"), "single.ts");
    }

    #[test]
    fn test_target_folder() {
        assert_eq!(target_folder("composables/use-foo"), "use-foo");
        assert_eq!(target_folder("button"), "button");
    }
}
