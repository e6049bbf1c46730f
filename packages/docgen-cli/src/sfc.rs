// SFC Block Splitting
//
// Splits a `.vue` single-file component into its blocks by text scanning.
// Nothing here interprets the blocks; the script goes to the extractor,
// the template to the slot scanner, the style to the CSS var scanner.

use once_cell::sync::Lazy;
use regex::Regex;

/// The raw text blocks of a single-file component.
#[derive(Debug, Clone, Default)]
pub struct SfcBlocks {
    /// `<script setup>` block content.
    pub script_setup: Option<String>,
    /// Plain `<script>` block content.
    pub script: Option<String>,
    /// `<template>` block content.
    pub template: Option<String>,
    /// Concatenated `<style>` block contents.
    pub style: Option<String>,
}

impl SfcBlocks {
    /// The script text to feed the extractor, preferring `<script setup>`.
    pub fn script_content(&self) -> Option<&str> {
        self.script_setup
            .as_deref()
            .or(self.script.as_deref())
    }

    pub fn has_script_setup(&self) -> bool {
        self.script_setup.is_some()
    }
}

static SCRIPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<script(?P<attrs>[^>]*)>(?P<body>.*?)</script>").expect("script regex")
});
static TEMPLATE_RE: Lazy<Regex> = Lazy::new(|| {
    // Template blocks nest <template> tags for named slots; match to the
    // last closing tag instead of the first.
    Regex::new(r"(?s)<template(?:[^>]*)>(?P<body>.*)</template>").expect("template regex")
});
static STYLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<style(?:[^>]*)>(?P<body>.*?)</style>").expect("style regex")
});

/// Split a `.vue` source into blocks. A `.ts` source is all script.
pub fn parse_sfc(source: &str) -> SfcBlocks {
    let mut blocks = SfcBlocks::default();

    for caps in SCRIPT_RE.captures_iter(source) {
        let attrs = caps.name("attrs").map(|m| m.as_str()).unwrap_or("");
        let body = caps.name("body").map(|m| m.as_str().to_string());
        if attrs.contains("setup") {
            if blocks.script_setup.is_none() {
                blocks.script_setup = body;
            }
        } else if blocks.script.is_none() {
            blocks.script = body;
        }
    }

    blocks.template = TEMPLATE_RE
        .captures(source)
        .and_then(|c| c.name("body"))
        .map(|m| m.as_str().to_string());

    let styles: Vec<&str> = STYLE_RE
        .captures_iter(source)
        .filter_map(|c| c.name("body").map(|m| m.as_str()))
        .collect();
    if !styles.is_empty() {
        blocks.style = Some(styles.join("\n"));
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_setup_block() {
        let src = "<script setup lang=\"ts\">\nconst x = 1\n</script>\n<template><div /></template>";
        let blocks = parse_sfc(src);
        assert!(blocks.has_script_setup());
        assert_eq!(blocks.script_content().unwrap().trim(), "const x = 1");
        assert_eq!(blocks.template.as_deref().unwrap().trim(), "<div />");
    }

    #[test]
    fn test_plain_script_block() {
        let src = "<script lang=\"ts\">export default {}</script>";
        let blocks = parse_sfc(src);
        assert!(!blocks.has_script_setup());
        assert_eq!(blocks.script_content().unwrap(), "export default {}");
    }

    #[test]
    fn test_nested_template_tags() {
        let src = "<template><div><template #row>x</template></div></template>";
        let blocks = parse_sfc(src);
        assert_eq!(
            blocks.template.as_deref().unwrap(),
            "<div><template #row>x</template></div>"
        );
    }

    #[test]
    fn test_multiple_style_blocks_concatenate() {
        let src = "<style>--a: 1;</style><style scoped>--b: 2;</style>";
        let blocks = parse_sfc(src);
        let style = blocks.style.unwrap();
        assert!(style.contains("--a: 1;"));
        assert!(style.contains("--b: 2;"));
    }

    #[test]
    fn test_no_blocks() {
        let blocks = parse_sfc("plain text");
        assert!(blocks.script_content().is_none());
        assert!(blocks.template.is_none());
        assert!(blocks.style.is_none());
    }
}
