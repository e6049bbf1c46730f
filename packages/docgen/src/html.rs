// HTML Entities and Snippet Cleanup
//
// Text transformations applied to embedded source snippets before they
// are rendered into documentation: entity decoding, comment stripping,
// and light reformatting. Unknown input always passes through verbatim.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Named entities handled by [`decode_entities`]. The set matches what
/// template sources actually contain; anything else is left verbatim.
static NAMED_ENTITIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("amp", "&"),
        ("lt", "<"),
        ("gt", ">"),
        ("quot", "\""),
        ("apos", "'"),
        ("nbsp", "\u{a0}"),
        ("copy", "\u{a9}"),
        ("hellip", "\u{2026}"),
        ("mdash", "\u{2014}"),
        ("ndash", "\u{2013}"),
        ("rarr", "\u{2192}"),
        ("larr", "\u{2190}"),
    ])
});

/// Decode HTML entities in a snippet.
///
/// Handles named entities from the table plus numeric forms (`&#64;`,
/// `&#x40;`). An unrecognized entity is emitted unchanged, ampersand and
/// all.
pub fn decode_entities(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '&' {
            result.push(ch);
            continue;
        }

        // Collect up to the terminating semicolon.
        let mut entity_buf = String::new();
        let mut consumed_semicolon = false;
        while let Some(&next) = chars.peek() {
            if next == ';' {
                chars.next();
                consumed_semicolon = true;
                break;
            }
            if !next.is_ascii_alphanumeric() && next != '#' && next != 'x' && next != 'X' {
                break;
            }
            entity_buf.push(next);
            chars.next();
            if entity_buf.len() > 10 {
                break;
            }
        }

        let decoded = if !consumed_semicolon {
            None
        } else if let Some(digits) = entity_buf.strip_prefix("#x").or_else(|| entity_buf.strip_prefix("#X")) {
            u32::from_str_radix(digits, 16)
                .ok()
                .and_then(std::char::from_u32)
                .map(|c| c.to_string())
        } else if let Some(digits) = entity_buf.strip_prefix('#') {
            digits
                .parse::<u32>()
                .ok()
                .and_then(std::char::from_u32)
                .map(|c| c.to_string())
        } else {
            NAMED_ENTITIES.get(entity_buf.as_str()).map(|s| s.to_string())
        };

        if let Some(dec) = decoded {
            result.push_str(&dec);
        } else {
            result.push('&');
            result.push_str(&entity_buf);
            if consumed_semicolon {
                result.push(';');
            }
        }
    }

    result
}

static BLOCK_COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment regex"));
static LINE_COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*//[^\n]*\n?").expect("line comment regex"));
static HTML_COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("html comment regex"));

/// Strip comments from a snippet before embedding it in documentation.
///
/// Removes block, whole-line `//` and HTML comments. Trailing `//`
/// comments on code lines are kept; `//` can also appear inside string
/// literals and URLs.
pub fn strip_comments(input: &str) -> String {
    let no_blocks = BLOCK_COMMENT_RE.replace_all(input, "");
    let no_lines = LINE_COMMENT_RE.replace_all(&no_blocks, "");
    HTML_COMMENT_RE.replace_all(&no_lines, "").to_string()
}

/// Light reformatting of a snippet keyed by file extension.
///
/// Normalizes trailing whitespace and collapses runs of blank lines. Any
/// input this cannot handle passes through unchanged; a snippet is never
/// dropped because it would not format.
pub fn format_snippet(input: &str, extension: &str) -> String {
    match extension {
        "vue" | "ts" | "js" | "css" | "json" => {
            let mut out = String::with_capacity(input.len());
            let mut blank_run = 0usize;
            for line in input.lines() {
                let line = line.trim_end();
                if line.is_empty() {
                    blank_run += 1;
                    if blank_run > 1 {
                        continue;
                    }
                } else {
                    blank_run = 0;
                }
                out.push_str(line);
                out.push('\n');
            }
            // A snippet keeps exactly one trailing newline.
            while out.ends_with("\n\n") {
                out.pop();
            }
            out
        }
        _ => input.to_string(),
    }
}
