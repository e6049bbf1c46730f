// Markdown Rendering
//
// String templates that project a `ComponentMetadata` record (plus
// optional dependency info and prepared source snippets) into a Markdown
// document. Two templates exist: one for UI components, one for
// composables. Pure data-in, text-out.

use crate::entities::{ComponentMetadata, DependencyMapEntry};
use crate::html;

/// Which documentation template to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Component,
    Composable,
}

/// A source snippet prepared for embedding.
#[derive(Debug, Clone)]
pub struct SourceSnippet {
    pub file_name: String,
    pub extension: String,
    pub content: String,
}

/// Render one Markdown document.
pub fn render(
    kind: DocKind,
    meta: &ComponentMetadata,
    deps: Option<&DependencyMapEntry>,
    snippets: &[SourceSnippet],
) -> String {
    match kind {
        DocKind::Component => render_component(meta, deps, snippets),
        DocKind::Composable => render_composable(meta, deps, snippets),
    }
}

fn render_component(
    meta: &ComponentMetadata,
    deps: Option<&DependencyMapEntry>,
    snippets: &[SourceSnippet],
) -> String {
    let mut out = String::new();
    push_frontmatter(&mut out, meta);

    push_table(
        &mut out,
        "Props",
        &["Prop", "Type", "Default", "Description"],
        meta.props.iter().map(|p| {
            vec![
                code(&p.name),
                code(&p.prop_type),
                code(&p.default),
                cell(&p.description),
            ]
        }),
    );

    push_table(
        &mut out,
        "Emits",
        &["Event", "Payload", "Description"],
        meta.emits.iter().map(|e| {
            vec![code(&e.name), code(&e.params.join(", ")), cell(&e.description)]
        }),
    );

    push_table(
        &mut out,
        "Slots",
        &["Slot", "Scope", "Description"],
        meta.slots.iter().map(|s| {
            vec![code(&s.name), code(&s.params.join(", ")), cell(&s.description)]
        }),
    );

    push_table(
        &mut out,
        "Exposes",
        &["Name", "Type", "Description"],
        meta.exposes.iter().map(|e| {
            vec![code(&e.name), code(&e.expose_type), cell(&e.description)]
        }),
    );

    push_table(
        &mut out,
        "CSS Variables",
        &["Variable", "Default", "Description"],
        meta.css_vars.iter().map(|v| {
            vec![code(&v.name), code(&v.value), cell(&v.description)]
        }),
    );

    push_types(&mut out, meta);
    push_dependencies(&mut out, deps);
    push_snippets(&mut out, snippets);

    out
}

fn render_composable(
    meta: &ComponentMetadata,
    deps: Option<&DependencyMapEntry>,
    snippets: &[SourceSnippet],
) -> String {
    let mut out = String::new();
    push_frontmatter(&mut out, meta);

    push_table(
        &mut out,
        "Returns",
        &["Name", "Type", "Description"],
        meta.exposes.iter().map(|e| {
            vec![code(&e.name), code(&e.expose_type), cell(&e.description)]
        }),
    );

    push_table(
        &mut out,
        "Parameters",
        &["Name", "Type", "Default", "Description"],
        meta.props.iter().map(|p| {
            vec![
                code(&p.name),
                code(&p.prop_type),
                code(&p.default),
                cell(&p.description),
            ]
        }),
    );

    push_types(&mut out, meta);
    push_dependencies(&mut out, deps);
    push_snippets(&mut out, snippets);

    out
}

fn push_frontmatter(out: &mut String, meta: &ComponentMetadata) {
    out.push_str("---\n");
    out.push_str(&format!("title: {}\n", nonempty(&meta.title, &meta.name)));
    if !meta.description.is_empty() {
        out.push_str(&format!("description: {}\n", meta.description));
    }
    if !meta.category.is_empty() {
        out.push_str(&format!("category: {}\n", meta.category));
    }
    if !meta.author.is_empty() {
        out.push_str(&format!("author: {}\n", meta.author));
    }
    out.push_str("---\n\n");
    out.push_str(&format!("# {}\n\n", nonempty(&meta.title, &meta.name)));
    if !meta.description.is_empty() {
        out.push_str(&meta.description);
        out.push_str("\n\n");
    }
}

fn push_table<'a, I>(out: &mut String, heading: &str, columns: &[&str], rows: I)
where
    I: Iterator<Item = Vec<String>>,
{
    let rows: Vec<Vec<String>> = rows.collect();
    if rows.is_empty() {
        return;
    }

    out.push_str(&format!("## {}\n\n", heading));
    out.push_str(&format!("| {} |\n", columns.join(" | ")));
    out.push_str(&format!(
        "|{}\n",
        columns.iter().map(|_| " --- |").collect::<String>()
    ));
    for row in rows {
        out.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    out.push('\n');
}

fn push_types(out: &mut String, meta: &ComponentMetadata) {
    if meta.types.is_empty() {
        return;
    }
    out.push_str("## Types\n\n");
    for ty in &meta.types {
        if !ty.description.is_empty() {
            out.push_str(&ty.description);
            out.push_str("\n\n");
        }
        out.push_str("```ts\n");
        out.push_str(ty.definition.trim_end());
        out.push_str("\n```\n\n");
    }
}

fn push_dependencies(out: &mut String, deps: Option<&DependencyMapEntry>) {
    let Some(deps) = deps else { return };
    if deps.depends_on.is_empty() && deps.used_by.is_empty() {
        return;
    }

    out.push_str("## Dependencies\n\n");
    if !deps.depends_on.is_empty() {
        out.push_str("Depends on:\n\n");
        for group in &deps.depends_on {
            out.push_str(&format!("- `{}`\n", group.group));
        }
        out.push('\n');
    }
    if !deps.used_by.is_empty() {
        out.push_str("Used by:\n\n");
        for user in &deps.used_by {
            out.push_str(&format!("- `{}`\n", user));
        }
        out.push('\n');
    }
}

fn push_snippets(out: &mut String, snippets: &[SourceSnippet]) {
    if snippets.is_empty() {
        return;
    }
    out.push_str("## Source\n\n");
    for snippet in snippets {
        let prepared = prepare_snippet(&snippet.content, &snippet.extension);
        out.push_str(&format!("### {}\n\n", snippet.file_name));
        out.push_str(&format!("```{}\n", snippet.extension));
        out.push_str(prepared.trim_end());
        out.push_str("\n```\n\n");
    }
}

/// Entity decoding, comment stripping, then reformatting. A formatting
/// failure degrades to the stripped snippet, never drops it.
pub fn prepare_snippet(content: &str, extension: &str) -> String {
    let decoded = html::decode_entities(content);
    let stripped = html::strip_comments(&decoded);
    html::format_snippet(&stripped, extension)
}

fn nonempty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Escape a table cell.
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

/// A table cell rendered as inline code; empty stays empty.
fn code(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("`{}`", cell(value))
    }
}
