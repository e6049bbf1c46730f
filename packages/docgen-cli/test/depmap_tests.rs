// Dependency mapping integration tests over real fixture trees: alias
// resolution, graph symmetry and partial-failure behavior.

use registry_docgen::entities::ImportKind;
use registry_docgen_cli::depmap::DependencyMapper;
use registry_docgen_cli::imports::{extract_file_imports, AliasTable, ImportResolver};
use registry_docgen_cli::logging::NullLogger;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Project with a button component importing a composable through the
/// `~~/` alias.
fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        "registry/new-york/ui/button/Button.vue",
        r#"<script setup lang="ts">
import { useFoo } from '~~/registry/new-york/composables/use-foo/useFoo'
const props = defineProps<{ label: string }>()
</script>
<template><button>{{ label }}</button></template>
"#,
    );
    write(root, "registry/new-york/ui/button/index.ts", "export { default } from './Button.vue'\n");
    write(
        root,
        "registry/new-york/composables/use-foo/useFoo.ts",
        "export function useFoo() { return 1 }\n",
    );

    dir
}

fn resolver_for(root: &Path) -> ImportResolver {
    let mut aliases = AliasTable::empty();
    aliases.insert("~~/", root.to_path_buf());
    ImportResolver::new(aliases, root.join("registry/new-york"))
}

#[test]
fn alias_import_resolves_and_classifies_internal() {
    let dir = fixture();
    let root = dir.path();
    let resolver = resolver_for(root);

    let file = root.join("registry/new-york/ui/button/index2.ts");
    let source = "import { useFoo } from '~~/registry/new-york/composables/use-foo/useFoo'\n";
    let folder = root.join("registry/new-york/ui/button");
    let imports = extract_file_imports(source, &file, &resolver, &folder).unwrap();

    assert_eq!(imports.len(), 1);
    let import = &imports[0];
    assert_eq!(import.kind, ImportKind::Internal);
    assert_eq!(
        import.relative_path.as_deref(),
        Some("composables/use-foo/useFoo.ts")
    );
    assert_eq!(import.specifiers, vec!["useFoo".to_string()]);
}

#[test]
fn relative_import_inside_folder_is_local() {
    let dir = fixture();
    let root = dir.path();
    let resolver = resolver_for(root);

    let file = root.join("registry/new-york/ui/button/index.ts");
    let source = fs::read_to_string(&file).unwrap();
    let folder = root.join("registry/new-york/ui/button");
    let imports = extract_file_imports(&source, &file, &resolver, &folder).unwrap();

    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].kind, ImportKind::Local);
}

#[test]
fn bare_package_import_is_external() {
    let dir = fixture();
    let root = dir.path();
    let resolver = resolver_for(root);

    let file = root.join("registry/new-york/ui/button/helper.ts");
    let folder = root.join("registry/new-york/ui/button");
    let imports =
        extract_file_imports("import { ref } from 'vue'\n", &file, &resolver, &folder).unwrap();

    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].kind, ImportKind::External);
    assert!(imports[0].resolved_path.is_none());
}

#[test]
fn dynamic_import_is_recovered() {
    let dir = fixture();
    let root = dir.path();
    let resolver = resolver_for(root);

    let file = root.join("registry/new-york/ui/button/lazy.ts");
    let folder = root.join("registry/new-york/ui/button");
    let source = "const load = () => import('~~/registry/new-york/composables/use-foo/useFoo')\n";
    let imports = extract_file_imports(source, &file, &resolver, &folder).unwrap();

    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].kind, ImportKind::Internal);
}

#[test]
fn depends_on_and_used_by_are_symmetric() {
    let dir = fixture();
    let root = dir.path();
    let logger = NullLogger;
    let mut mapper = DependencyMapper::new(resolver_for(root), &logger);

    let folders = vec![
        root.join("registry/new-york/ui/button"),
        root.join("registry/new-york/composables/use-foo"),
    ];
    let map = mapper.map_folders(&folders);

    let button = map.get("button").unwrap();
    assert_eq!(button.depends_on.len(), 1);
    assert_eq!(button.depends_on[0].group, "composables/use-foo");
    assert_eq!(button.depends_on[0].path, "composables/use-foo/useFoo.ts");
    assert!(button.files.contains(&"Button.vue".to_string()));

    let use_foo = map.get("use-foo").unwrap();
    assert_eq!(use_foo.used_by, vec!["button".to_string()]);
    assert!(use_foo.depends_on.is_empty());

    // Every dependsOn edge has a matching usedBy edge.
    for (from, entry) in &map {
        for group in &entry.depends_on {
            let target = group.group.rsplit('/').next().unwrap().to_string();
            let target_entry = map.get(&target).unwrap();
            assert!(target_entry.used_by.contains(from));
        }
    }
}

#[test]
fn referenced_but_unscanned_folder_gets_synthesized_entry() {
    let dir = fixture();
    let root = dir.path();
    let logger = NullLogger;
    let mut mapper = DependencyMapper::new(resolver_for(root), &logger);

    let map = mapper.map_folders(&[root.join("registry/new-york/ui/button")]);

    let use_foo = map.get("use-foo").unwrap();
    assert!(use_foo.depends_on.is_empty());
    assert!(use_foo.files.is_empty());
    assert_eq!(use_foo.used_by, vec!["button".to_string()]);
}

#[test]
fn missing_folder_yields_empty_entry() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let logger = NullLogger;
    let mut mapper = DependencyMapper::new(resolver_for(root), &logger);

    let map = mapper.map_folders(&[root.join("registry/new-york/ui/ghost")]);

    let ghost = map.get("ghost").unwrap();
    assert!(ghost.files.is_empty());
    assert!(ghost.depends_on.is_empty());
    assert!(ghost.used_by.is_empty());
}

#[test]
fn unparsable_file_is_skipped_but_mapping_stays_total() {
    let dir = fixture();
    let root = dir.path();
    write(root, "registry/new-york/ui/button/broken.ts", "const = ;\n");

    let logger = NullLogger;
    let mut mapper = DependencyMapper::new(resolver_for(root), &logger);
    let map = mapper.map_folders(&[
        root.join("registry/new-york/ui/button"),
        root.join("registry/new-york/composables/use-foo"),
    ]);

    let button = map.get("button").unwrap();
    // The broken file still appears; imports from the good files survive.
    assert!(button.files.contains(&"broken.ts".to_string()));
    assert_eq!(button.depends_on.len(), 1);
}

#[test]
fn map_is_deterministic_across_resets() {
    let dir = fixture();
    let root = dir.path();
    let logger = NullLogger;
    let mut mapper = DependencyMapper::new(resolver_for(root), &logger);

    let folders: Vec<PathBuf> = vec![
        root.join("registry/new-york/ui/button"),
        root.join("registry/new-york/composables/use-foo"),
    ];
    let first = serde_json::to_string(&mapper.map_folders(&folders)).unwrap();
    mapper.reset();
    let second = serde_json::to_string(&mapper.map_folders(&folders)).unwrap();

    assert_eq!(first, second);
}
