// Import Extraction and Resolution
//
// Recovers every import of a file (static declarations, re-exports, and
// dynamic `import(...)` calls), resolves specifiers through the alias
// table, probes the filesystem for the concrete file, and classifies the
// result relative to the registry root.

use crate::error::ExtractError;
use crate::extract::parse_script;
use once_cell::sync::Lazy;
use oxc_allocator::Allocator;
use oxc_ast::ast::{ImportDeclarationSpecifier, ModuleExportName, Statement};
use regex::Regex;
use registry_docgen::entities::{ImportInfo, ImportKind};
use std::path::{Path, PathBuf};

/// Existence probes applied to a logical import path, in order.
const RESOLUTION_SUFFIXES: &[&str] = &["", ".ts", ".js", ".vue", "/index.ts", "/index.js", "/index.vue"];

/// Path-alias table derived from the project's path-mapping config
/// (`tsconfig.json` `compilerOptions.paths`).
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    /// Prefix (without the trailing `*`) to absolute base directory.
    entries: Vec<(String, PathBuf)>,
}

impl AliasTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read `compilerOptions.paths` from a tsconfig-style file. Entries
    /// look like `"~~/*": ["./*"]`; values resolve against the config
    /// file's directory. A missing file yields an empty table.
    pub fn from_tsconfig(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.is_file() {
            return Ok(Self::empty());
        }
        let content = std::fs::read_to_string(config_path)?;
        let json: serde_json::Value = serde_json::from_str(&content)?;
        let base = config_path.parent().unwrap_or(Path::new("."));

        let mut table = Self::empty();
        if let Some(paths) = json
            .get("compilerOptions")
            .and_then(|o| o.get("paths"))
            .and_then(|p| p.as_object())
        {
            for (pattern, targets) in paths {
                let Some(target) = targets.as_array().and_then(|a| a.first()).and_then(|t| t.as_str())
                else {
                    continue;
                };
                let prefix = pattern.trim_end_matches('*').to_string();
                let target_base = base.join(target.trim_end_matches('*'));
                table.insert(prefix, target_base);
            }
        }
        Ok(table)
    }

    pub fn insert(&mut self, prefix: impl Into<String>, base: impl Into<PathBuf>) {
        self.entries.push((prefix.into(), base.into()));
        // Longest prefix first so `~~/registry` beats `~~/`.
        self.entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Expand an aliased specifier to a logical path, if any alias
    /// prefix matches.
    pub fn expand(&self, specifier: &str) -> Option<PathBuf> {
        for (prefix, base) in &self.entries {
            if let Some(rest) = specifier.strip_prefix(prefix.as_str()) {
                return Some(base.join(rest));
            }
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves import specifiers to concrete files and classifies them.
#[derive(Debug, Clone)]
pub struct ImportResolver {
    aliases: AliasTable,
    registry_root: PathBuf,
}

impl ImportResolver {
    pub fn new(aliases: AliasTable, registry_root: impl Into<PathBuf>) -> Self {
        Self {
            aliases,
            registry_root: registry_root.into(),
        }
    }

    pub fn registry_root(&self) -> &Path {
        &self.registry_root
    }

    /// Alias match, then relative resolution, then absolute; followed by
    /// the extension/index probes. Bare package specifiers resolve to
    /// nothing and classify as external.
    pub fn resolve(&self, specifier: &str, importing_dir: &Path) -> Option<PathBuf> {
        let logical = if let Some(expanded) = self.aliases.expand(specifier) {
            expanded
        } else if specifier.starts_with('.') {
            importing_dir.join(specifier)
        } else if Path::new(specifier).is_absolute() {
            PathBuf::from(specifier)
        } else {
            return None;
        };

        probe_candidates(&logical)
    }

    /// Classify a resolved path against the registry root and the
    /// importing folder.
    pub fn classify(&self, resolved: Option<&Path>, importing_folder: &Path) -> ImportKind {
        match resolved {
            Some(path) if path.starts_with(importing_folder) => ImportKind::Local,
            Some(path) if path.starts_with(&self.registry_root) => ImportKind::Internal,
            _ => ImportKind::External,
        }
    }
}

fn probe_candidates(logical: &Path) -> Option<PathBuf> {
    let base = logical.to_string_lossy();
    for suffix in RESOLUTION_SUFFIXES {
        let candidate = PathBuf::from(format!("{}{}", base, suffix));
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

static DYNAMIC_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bimport\s*\(\s*["'](?P<path>[^"']+)["']\s*\)"#).expect("dynamic import regex")
});

/// Extract all imports of one file.
///
/// Static declarations and re-exports come from the AST; dynamic
/// `import(...)` calls are recovered by a regex pass over the source and
/// merged afterwards, skipping paths the static pass already saw.
pub fn extract_file_imports(
    source: &str,
    path: &Path,
    resolver: &ImportResolver,
    importing_folder: &Path,
) -> Result<Vec<ImportInfo>, ExtractError> {
    let allocator = Allocator::default();
    let program = parse_script(&allocator, source, path)?;
    let importing_dir = path.parent().unwrap_or(Path::new("."));

    let mut imports: Vec<ImportInfo> = Vec::new();

    for statement in &program.body {
        let (import_path, specifiers) = match statement {
            Statement::ImportDeclaration(decl) => {
                let mut names = Vec::new();
                if let Some(specs) = &decl.specifiers {
                    for spec in specs.iter() {
                        names.push(specifier_name(spec));
                    }
                }
                (decl.source.value.to_string(), names)
            }
            Statement::ExportNamedDeclaration(decl) => match &decl.source {
                Some(module) => (module.value.to_string(), Vec::new()),
                None => continue,
            },
            Statement::ExportAllDeclaration(decl) => (decl.source.value.to_string(), Vec::new()),
            _ => continue,
        };

        imports.push(build_import_info(
            import_path,
            specifiers,
            resolver,
            importing_dir,
            importing_folder,
        ));
    }

    for caps in DYNAMIC_IMPORT_RE.captures_iter(source) {
        let import_path = match caps.name("path") {
            Some(m) => m.as_str().to_string(),
            None => continue,
        };
        if imports.iter().any(|i| i.import_path == import_path) {
            continue;
        }
        imports.push(build_import_info(
            import_path,
            Vec::new(),
            resolver,
            importing_dir,
            importing_folder,
        ));
    }

    Ok(imports)
}

fn build_import_info(
    import_path: String,
    specifiers: Vec<String>,
    resolver: &ImportResolver,
    importing_dir: &Path,
    importing_folder: &Path,
) -> ImportInfo {
    let resolved = resolver.resolve(&import_path, importing_dir);
    let kind = resolver.classify(resolved.as_deref(), importing_folder);

    let relative_path = resolved.as_deref().and_then(|p| {
        p.strip_prefix(resolver.registry_root())
            .ok()
            .map(|rel| normalize_slashes(&rel.to_string_lossy()))
    });

    let name = specifiers
        .first()
        .cloned()
        .unwrap_or_else(|| last_segment(&import_path));

    ImportInfo {
        name,
        import_path,
        resolved_path: resolved.map(|p| normalize_slashes(&p.to_string_lossy())),
        relative_path,
        kind,
        specifiers,
    }
}

fn specifier_name(spec: &ImportDeclarationSpecifier<'_>) -> String {
    match spec {
        ImportDeclarationSpecifier::ImportSpecifier(s) => match &s.imported {
            ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
            ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
            ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
        },
        ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => s.local.name.to_string(),
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => s.local.name.to_string(),
    }
}

fn last_segment(path: &str) -> String {
    path.rsplit('/')
        .next()
        .unwrap_or(path)
        .trim_end_matches(".ts")
        .trim_end_matches(".js")
        .trim_end_matches(".vue")
        .to_string()
}

fn normalize_slashes(path: &str) -> String {
    path.replace('\\', "/")
}
