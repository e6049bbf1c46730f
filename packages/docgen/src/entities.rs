// Registry Entities
//
// Records produced by extraction and consumed by the renderers. All of
// these are constructed fresh per batch run, serialized, and discarded.

use indexmap::IndexMap;
use serde::Serialize;

/// Sentinel used when a prop has no recoverable default value.
pub const NO_DEFAULT: &str = "-";

/// Everything extracted from one component or composable folder.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComponentMetadata {
    pub name: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub category: String,
    pub props: Vec<PropInfo>,
    pub slots: Vec<SlotInfo>,
    pub emits: Vec<EmitInfo>,
    pub exposes: Vec<ExposeInfo>,
    pub injects: Vec<InjectInfo>,
    pub provides: Vec<ProvideInfo>,
    pub types: Vec<TypeInfo>,
    #[serde(rename = "cssVars")]
    pub css_vars: Vec<CssVarInfo>,
}

impl ComponentMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// True when no declaration of any kind was found.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
            && self.slots.is_empty()
            && self.emits.is_empty()
            && self.exposes.is_empty()
            && self.injects.is_empty()
            && self.provides.is_empty()
            && self.types.is_empty()
            && self.css_vars.is_empty()
    }

    /// Merge declarations from another file of the same folder into this
    /// record. Scalar fields keep the first non-empty value seen.
    pub fn merge(&mut self, other: ComponentMetadata) {
        if self.title.is_empty() {
            self.title = other.title;
        }
        if self.description.is_empty() {
            self.description = other.description;
        }
        if self.category.is_empty() {
            self.category = other.category;
        }
        if self.author.is_empty() {
            self.author = other.author;
        }
        self.props.extend(other.props);
        self.slots.extend(other.slots);
        self.emits.extend(other.emits);
        self.exposes.extend(other.exposes);
        self.injects.extend(other.injects);
        self.provides.extend(other.provides);
        self.types.extend(other.types);
        self.css_vars.extend(other.css_vars);
    }
}

/// A single prop declaration.
///
/// `prop_type` is the source-level type expression text, not a resolved
/// type. `default` is the literal default when one could be recovered
/// structurally, otherwise [`NO_DEFAULT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub prop_type: String,
    pub default: String,
    pub description: String,
}

impl PropInfo {
    pub fn new(name: impl Into<String>, prop_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prop_type: prop_type.into(),
            default: NO_DEFAULT.to_string(),
            description: String::new(),
        }
    }
}

/// A named slot with its scope parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotInfo {
    pub name: String,
    pub params: Vec<String>,
    pub description: String,
}

/// An emitted event with its payload parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmitInfo {
    pub name: String,
    pub params: Vec<String>,
    pub description: String,
}

/// A member exposed to template refs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExposeInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub expose_type: String,
    pub description: String,
}

/// An injected dependency key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InjectInfo {
    pub key: String,
    #[serde(rename = "type")]
    pub value_type: String,
    pub description: String,
}

/// A provided dependency key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvideInfo {
    pub key: String,
    #[serde(rename = "type")]
    pub value_type: String,
    pub description: String,
}

/// A top-level type alias or interface declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    pub name: String,
    pub definition: String,
    pub description: String,
}

/// A CSS custom property declared in a style block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CssVarInfo {
    pub name: String,
    pub value: String,
    pub description: String,
}

/// Classification of a single import statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// Within the importing folder.
    Local,
    /// Resolves into the registry root, outside the importing folder.
    Internal,
    /// Outside the registry (packages, framework modules, unresolvable).
    External,
}

/// One import statement, static or dynamic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportInfo {
    /// Primary binding name (default import, first named import, or the
    /// last path segment for bare side-effect imports).
    pub name: String,
    #[serde(rename = "importPath")]
    pub import_path: String,
    #[serde(rename = "resolvedPath", skip_serializing_if = "Option::is_none")]
    pub resolved_path: Option<String>,
    #[serde(rename = "relativePath", skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
    #[serde(rename = "type")]
    pub kind: ImportKind,
    pub specifiers: Vec<String>,
}

/// One deduplicated `dependsOn` entry of a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportGroup {
    /// Top two path segments of `path`, e.g. `composables/use-foo`.
    pub group: String,
    /// Registry-relative path of the imported file.
    pub path: String,
}

/// Folder-level dependency record.
///
/// Invariant: for all folders A and B, if A's `depends_on` names B then
/// B's `used_by` contains A. The mapper maintains this with a second
/// inversion pass after all folders are aggregated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyMapEntry {
    #[serde(rename = "dependsOn")]
    pub depends_on: Vec<ImportGroup>,
    #[serde(rename = "usedBy")]
    pub used_by: Vec<String>,
    pub files: Vec<String>,
}

/// The whole-project dependency graph, keyed by folder name.
///
/// An `IndexMap` keeps serialization order equal to scan order, which
/// keeps output byte-stable across runs.
pub type DependencyMap = IndexMap<String, DependencyMapEntry>;

/// A file belonging to a registry item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryFile {
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// The packaged unit written to a per-component definition file and
/// aggregated into `registry.json`.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub name: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub files: Vec<RegistryFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencyMapEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_merge_keeps_first_scalars() {
        let mut a = ComponentMetadata::new("button");
        a.category = "form".to_string();
        let mut b = ComponentMetadata::new("button");
        b.category = "layout".to_string();
        b.props.push(PropInfo::new("size", "string"));

        a.merge(b);
        assert_eq!(a.category, "form");
        assert_eq!(a.props.len(), 1);
    }

    #[test]
    fn test_empty_metadata() {
        let meta = ComponentMetadata::new("empty");
        assert!(meta.is_empty());
    }

    #[test]
    fn test_prop_default_sentinel() {
        let prop = PropInfo::new("count", "number");
        assert_eq!(prop.default, NO_DEFAULT);
    }
}
