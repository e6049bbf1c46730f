// End-to-end scanner tests: definition files, Markdown output, rerun
// stability, partial failures and registry aggregation.

use registry_docgen_cli::config::RegistryConfig;
use registry_docgen_cli::logging::NullLogger;
use registry_docgen_cli::output::{aggregate_registry, write_registry};
use registry_docgen_cli::scanner::Scanner;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A registry with one UI component and one composable it depends on.
fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        "registry/new-york/ui/button/Button.vue",
        r#"<script setup lang="ts">
/**
 * A clickable button.
 */
import { useFoo } from '~~/registry/new-york/composables/use-foo/useFoo'

interface Props {
  /** Visible label. */
  label?: string
}
const props = withDefaults(defineProps<Props>(), { label: 'Click me' })
const emit = defineEmits<{ click: [event: MouseEvent] }>()
</script>

<template>
  <button @click="emit('click', $event)">
    <slot>{{ label }}</slot>
  </button>
</template>

<style scoped>
.button {
  /* Accent color of the button. */
  --button-accent: #3b82f6;
}
</style>
"#,
    );
    write(
        root,
        "registry/new-york/composables/use-foo/useFoo.ts",
        "export function useFoo() { return 1 }\n",
    );

    dir
}

fn run_scanner(root: &Path, logger: &NullLogger) -> registry_docgen_cli::scanner::ScanSummary {
    let scanner = Scanner::new(RegistryConfig::default(), root.to_path_buf(), logger);
    scanner.run()
}

#[test]
fn full_run_writes_definitions_and_markdown() {
    let dir = fixture();
    let root = dir.path();
    let logger = NullLogger;

    let summary = run_scanner(root, &logger);
    assert_eq!(summary.processed, 2);
    assert!(summary.errors.is_empty());

    let definition = root.join("registry/new-york/ui/button/assemblerjs.json");
    let item: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&definition).unwrap()).unwrap();
    assert_eq!(item["name"], "button");
    assert_eq!(item["type"], "registry:ui");
    assert_eq!(item["title"], "Button");
    assert_eq!(
        item["dependencies"]["dependsOn"][0]["group"],
        "composables/use-foo"
    );

    let composable = root.join("registry/new-york/composables/use-foo/assemblerjs.json");
    let item: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&composable).unwrap()).unwrap();
    assert_eq!(item["type"], "registry:hook");
    assert_eq!(item["dependencies"]["usedBy"][0], "button");

    let doc = fs::read_to_string(root.join("content/2.components/button.md")).unwrap();
    assert!(doc.contains("title: Button"));
    assert!(doc.contains("A clickable button."));
    assert!(doc.contains("| `label` | `string` | `Click me` | Visible label. |"));
    assert!(doc.contains("## Emits"));
    assert!(doc.contains("## Slots"));
    assert!(doc.contains("`--button-accent`"));
    assert!(doc.contains("## Dependencies"));

    assert!(root.join("content/4.composables/use-foo.md").is_file());
}

#[test]
fn rerun_produces_byte_identical_output() {
    let dir = fixture();
    let root = dir.path();
    let logger = NullLogger;

    run_scanner(root, &logger);
    let definition = root.join("registry/new-york/ui/button/assemblerjs.json");
    let doc = root.join("content/2.components/button.md");
    let first_definition = fs::read(&definition).unwrap();
    let first_doc = fs::read(&doc).unwrap();

    run_scanner(root, &logger);
    assert_eq!(fs::read(&definition).unwrap(), first_definition);
    assert_eq!(fs::read(&doc).unwrap(), first_doc);
}

#[test]
fn empty_folder_is_processed_without_error() {
    let dir = fixture();
    let root = dir.path();
    fs::create_dir_all(root.join("registry/new-york/ui/empty")).unwrap();

    let logger = NullLogger;
    let summary = run_scanner(root, &logger);
    assert!(summary.errors.is_empty());

    let definition = root.join("registry/new-york/ui/empty/assemblerjs.json");
    let item: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&definition).unwrap()).unwrap();
    assert_eq!(item["name"], "empty");
    assert_eq!(item["files"].as_array().unwrap().len(), 0);
}

#[test]
fn broken_folder_fails_alone() {
    let dir = fixture();
    let root = dir.path();
    write(root, "registry/new-york/ui/broken/part.ts", "const = ;\n");

    let logger = NullLogger;
    let summary = run_scanner(root, &logger);

    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.errors[0].folder, "broken");
    assert_eq!(summary.succeeded(), 2);
    assert!(root.join("registry/new-york/ui/button/assemblerjs.json").is_file());
}

#[test]
fn dependency_map_alone_is_symmetric() {
    let dir = fixture();
    let root = dir.path();
    let logger = NullLogger;

    let scanner = Scanner::new(RegistryConfig::default(), root.to_path_buf(), &logger);
    let map = scanner.dependency_map();

    let button = map.get("button").unwrap();
    assert_eq!(button.depends_on[0].group, "composables/use-foo");
    assert_eq!(map.get("use-foo").unwrap().used_by, vec!["button".to_string()]);
}

#[test]
fn registry_aggregation_collects_definitions() {
    let dir = fixture();
    let root = dir.path();
    let logger = NullLogger;
    let config = RegistryConfig::default();

    run_scanner(root, &logger);
    let registry = aggregate_registry(root, &config, &logger).unwrap();

    assert_eq!(registry.name, "new-york");
    assert_eq!(registry.items.len(), 2);

    let path = write_registry(root, &registry).unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["$schema"], "https://ui.shadcn.com/schema/registry.json");
    assert_eq!(value["items"].as_array().unwrap().len(), 2);
}

#[test]
fn duplicate_definition_names_keep_first() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let logger = NullLogger;
    let config = RegistryConfig::default();

    write(
        root,
        "registry/new-york/ui/alpha/assemblerjs.json",
        r#"{ "name": "shared", "title": "Alpha" }"#,
    );
    write(
        root,
        "registry/new-york/ui/beta/assemblerjs.json",
        r#"{ "name": "shared", "title": "Beta" }"#,
    );
    write(root, "registry/new-york/ui/broken/assemblerjs.json", "{ not json");
    write(root, "registry/new-york/ui/anon/assemblerjs.json", r#"{ "title": "No Name" }"#);

    let registry = aggregate_registry(root, &config, &logger).unwrap();

    assert_eq!(registry.items.len(), 1);
    assert_eq!(registry.items[0]["title"], "Alpha");
}
