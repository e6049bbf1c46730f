// CSS Custom Property Extraction
//
// Scans style-block text for `--name: value;` declarations and picks up
// an immediately preceding `/* ... */` comment as the description. Pure
// text analysis, no CSS parsing.

use crate::entities::CssVarInfo;
use once_cell::sync::Lazy;
use regex::Regex;

static CSS_VAR_RE: Lazy<Regex> = Lazy::new(|| {
    // Optional block comment, then a custom property declaration. The
    // comment only counts when nothing but whitespace separates it from
    // the declaration.
    Regex::new(r"(?s)(?:/\*\s*(?P<desc>.*?)\s*\*/\s*)?(?P<name>--[A-Za-z0-9_-]+)\s*:\s*(?P<value>[^;}]+)[;}]")
        .expect("css var regex")
});

/// Extract CSS custom properties from a style block.
///
/// Duplicate names keep the first occurrence. A declaration without a
/// preceding comment gets an empty description.
pub fn extract_css_vars(style_text: &str) -> Vec<CssVarInfo> {
    let mut vars: Vec<CssVarInfo> = Vec::new();

    for caps in CSS_VAR_RE.captures_iter(style_text) {
        let name = match caps.name("name") {
            Some(m) => m.as_str().to_string(),
            None => continue,
        };
        if vars.iter().any(|v| v.name == name) {
            continue;
        }
        let value = caps
            .name("value")
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        let description = caps
            .name("desc")
            .map(|m| normalize_comment(m.as_str()))
            .unwrap_or_default();

        vars.push(CssVarInfo {
            name,
            value,
            description,
        });
    }

    vars
}

/// Collapse a multi-line block comment body into a single line.
fn normalize_comment(body: &str) -> String {
    body.lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_with_comment_round_trip() {
        let vars = extract_css_vars("/* desc */ --foo: 10px;");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].name, "--foo");
        assert_eq!(vars[0].value, "10px");
        assert_eq!(vars[0].description, "desc");
    }

    #[test]
    fn test_var_without_comment() {
        let vars = extract_css_vars(":root { --accent: #ff0044; }");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].name, "--accent");
        assert_eq!(vars[0].value, "#ff0044");
        assert_eq!(vars[0].description, "");
    }

    #[test]
    fn test_duplicate_names_first_wins() {
        let vars = extract_css_vars("--gap: 4px; .dark { --gap: 8px; }");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].value, "4px");
    }

    #[test]
    fn test_multiline_comment_collapses() {
        let css = "/*\n * Radius applied to the\n * outer frame.\n */\n--radius: 0.5rem;";
        let vars = extract_css_vars(css);
        assert_eq!(vars[0].description, "Radius applied to the outer frame.");
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_css_vars("").is_empty());
        assert!(extract_css_vars(".btn { color: red; }").is_empty());
    }
}
