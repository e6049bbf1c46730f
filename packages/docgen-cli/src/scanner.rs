// Folder Scanning and Orchestration
//
// Enumerates component folders, sequences extraction, dependency
// mapping and output per folder, and collects errors without stopping
// the batch. One folder's failure never aborts the others; the caller
// prints the summary and decides the exit code.

use crate::config::RegistryConfig;
use crate::depmap::{list_source_files, DependencyMapper};
use crate::error::ExtractError;
use crate::extract::{extract_options_script, extract_setup_script};
use crate::imports::{AliasTable, ImportResolver};
use crate::logging::Logger;
use crate::output;
use crate::sfc::parse_sfc;
use registry_docgen::css_vars::extract_css_vars;
use registry_docgen::entities::{
    ComponentMetadata, DependencyMap, DependencyMapEntry, RegistryFile, RegistryItem,
};
use registry_docgen::markdown::SourceSnippet;
use registry_docgen::template::{merge_slots, scan_template_slots};
use std::path::{Path, PathBuf};

/// One folder's failure, reported in the final summary.
#[derive(Debug)]
pub struct FolderError {
    pub folder: String,
    pub error: anyhow::Error,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct ScanSummary {
    pub processed: usize,
    pub errors: Vec<FolderError>,
}

impl ScanSummary {
    pub fn succeeded(&self) -> usize {
        self.processed - self.errors.len()
    }
}

pub struct Scanner<'log> {
    config: RegistryConfig,
    project_root: PathBuf,
    logger: &'log dyn Logger,
}

impl<'log> Scanner<'log> {
    pub fn new(config: RegistryConfig, project_root: impl Into<PathBuf>, logger: &'log dyn Logger) -> Self {
        Self {
            config,
            project_root: project_root.into(),
            logger,
        }
    }

    /// Run the whole batch: enumerate folders, build the dependency map,
    /// then extract and write every folder's artifacts.
    pub fn run(&self) -> ScanSummary {
        let folders = self.enumerate_folders();
        if folders.is_empty() {
            self.logger.warn("no component folders found");
            return ScanSummary::default();
        }

        let resolver = ImportResolver::new(self.alias_table(), self.config.registry_root(&self.project_root));
        let mut mapper = DependencyMapper::new(resolver, self.logger);
        let folder_paths: Vec<PathBuf> = folders.iter().map(|(path, _)| path.clone()).collect();
        let dependency_map = mapper.map_folders(&folder_paths);

        let mut summary = ScanSummary::default();
        let total = folders.len();

        for (index, (folder, item_type)) in folders.iter().enumerate() {
            let name = folder_name(folder);
            self.logger
                .info(&format!("[{}/{}] {}", index + 1, total, name));

            summary.processed += 1;
            let deps = dependency_map.get(&name);
            if let Err(error) = self.process_folder(folder, item_type, deps) {
                self.logger.error(&format!("{}: {}", name, error));
                summary.errors.push(FolderError { folder: name, error });
            }
        }

        summary
    }

    /// Expose the dependency map without writing anything, for the
    /// registry aggregation path.
    pub fn dependency_map(&self) -> DependencyMap {
        let folders = self.enumerate_folders();
        let resolver = ImportResolver::new(self.alias_table(), self.config.registry_root(&self.project_root));
        let mut mapper = DependencyMapper::new(resolver, self.logger);
        let folder_paths: Vec<PathBuf> = folders.into_iter().map(|(path, _)| path).collect();
        mapper.map_folders(&folder_paths)
    }

    fn alias_table(&self) -> AliasTable {
        let tsconfig = self.project_root.join("tsconfig.json");
        let mut table = match AliasTable::from_tsconfig(&tsconfig) {
            Ok(table) => table,
            Err(error) => {
                self.logger
                    .warn(&format!("cannot read {}: {}", tsconfig.display(), error));
                AliasTable::empty()
            }
        };

        // Nuxt conventions when the project maps nothing itself.
        if table.is_empty() {
            table.insert("~~/", self.project_root.clone());
            table.insert("~/", self.project_root.clone());
            table.insert("@/", self.project_root.clone());
        }
        table
    }

    fn enumerate_folders(&self) -> Vec<(PathBuf, &'static str)> {
        let mut folders = Vec::new();
        for (root, item_type) in self.config.scan_roots(&self.project_root) {
            if !root.is_dir() {
                self.logger
                    .warn(&format!("missing directory: {}", root.display()));
                continue;
            }
            for folder in output::subfolders(&root, &self.config.skip_subfolders) {
                folders.push((folder, item_type));
            }
        }
        folders
    }

    fn process_folder(
        &self,
        folder: &Path,
        item_type: &str,
        deps: Option<&DependencyMapEntry>,
    ) -> anyhow::Result<()> {
        let name = folder_name(folder);
        let files = list_source_files(folder);

        let mut meta = ComponentMetadata::new(name.clone());
        let mut category_from_index: Option<String> = None;
        let mut category_first: Option<String> = None;
        let mut snippets: Vec<SourceSnippet> = Vec::new();

        for file in &files {
            let source = std::fs::read_to_string(file).map_err(|error| ExtractError::Read {
                path: file.clone(),
                source: error,
            })?;
            let file_meta = self.extract_file(&source, file)?;

            let stem = file
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            if !file_meta.category.is_empty() {
                if stem.starts_with("index") && category_from_index.is_none() {
                    category_from_index = Some(file_meta.category.clone());
                } else if category_first.is_none() {
                    category_first = Some(file_meta.category.clone());
                }
            }

            snippets.push(SourceSnippet {
                file_name: file
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
                extension: file
                    .extension()
                    .map(|e| e.to_string_lossy().to_string())
                    .unwrap_or_default(),
                content: source,
            });

            meta.merge(file_meta);
        }

        // First-match-wins, preferring an index-named file.
        meta.category = category_from_index
            .or(category_first)
            .unwrap_or_default();
        if meta.title.is_empty() {
            meta.title = title_case(&name);
        }
        if meta.author.is_empty() {
            meta.author = self.config.author.clone();
        }

        let item = self.build_item(folder, item_type, &meta, deps);
        output::write_definition(folder, &self.config, &item)?;
        output::write_markdown(&self.project_root, &self.config, item_type, &meta, deps, &snippets)?;

        Ok(())
    }

    /// Extract one file's metadata: script declarations plus the
    /// template and style fallbacks for `.vue` sources.
    fn extract_file(&self, source: &str, file: &Path) -> anyhow::Result<ComponentMetadata> {
        let is_vue = file.extension().map(|e| e == "vue").unwrap_or(false);
        if !is_vue {
            return Ok(extract_options_script(source, file)?);
        }

        let blocks = parse_sfc(source);
        let mut meta = match blocks.script_content() {
            Some(script) if blocks.has_script_setup() => extract_setup_script(script, file)?,
            Some(script) => extract_options_script(script, file)?,
            None => ComponentMetadata::default(),
        };

        if let Some(template) = &blocks.template {
            let structural = std::mem::take(&mut meta.slots);
            meta.slots = merge_slots(structural, scan_template_slots(template));
        }
        if let Some(style) = &blocks.style {
            meta.css_vars.extend(extract_css_vars(style));
        }

        Ok(meta)
    }

    fn build_item(
        &self,
        folder: &Path,
        item_type: &str,
        meta: &ComponentMetadata,
        deps: Option<&DependencyMapEntry>,
    ) -> RegistryItem {
        let files = list_source_files(folder)
            .into_iter()
            .map(|file| RegistryFile {
                path: file
                    .strip_prefix(&self.project_root)
                    .unwrap_or(&file)
                    .to_string_lossy()
                    .replace('\\', "/"),
                file_type: item_type.to_string(),
                target: None,
            })
            .collect();

        RegistryItem {
            item_type: item_type.to_string(),
            name: meta.name.clone(),
            title: meta.title.clone(),
            description: meta.description.clone(),
            category: if meta.category.is_empty() {
                None
            } else {
                Some(meta.category.clone())
            },
            files,
            dependencies: deps.cloned(),
        }
    }
}

fn folder_name(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| folder.display().to_string())
}

/// `use-local-storage` becomes `Use Local Storage`.
fn title_case(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
