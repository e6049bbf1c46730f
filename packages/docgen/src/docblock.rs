// Doc Comment Parsing
//
// Turns raw comment text (`/** ... */`, `/* ... */` or `// ...`) into a
// description plus tags. The AST side only decides which comment belongs
// to which declaration; the text handling lives here.

/// A `@tag value` entry inside a doc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    pub name: String,
    pub text: String,
}

/// Parsed doc comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBlock {
    pub description: String,
    pub tags: Vec<DocTag>,
}

impl DocBlock {
    /// Look up the first tag with the given name.
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.text.as_str())
    }
}

/// Parse raw comment text, delimiters included, into a [`DocBlock`].
///
/// Handles block comments (leading `*` gutters stripped per line) and
/// line comments. Unparseable input degrades to an empty block.
pub fn parse(raw: &str) -> DocBlock {
    let body = strip_delimiters(raw);

    let mut description = String::new();
    let mut tags: Vec<DocTag> = Vec::new();
    let mut current_tag: Option<(String, String)> = None;

    for line in body.lines() {
        let trimmed = line.trim().trim_start_matches('*').trim();

        if let Some(rest) = trimmed.strip_prefix('@') {
            if let Some((name, text)) = current_tag.take() {
                tags.push(DocTag { name, text });
            }
            match rest.find(char::is_whitespace) {
                Some(pos) => {
                    current_tag = Some((rest[..pos].to_string(), rest[pos..].trim().to_string()));
                }
                None => {
                    current_tag = Some((rest.to_string(), String::new()));
                }
            }
        } else if let Some((_, ref mut text)) = current_tag {
            if !trimmed.is_empty() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(trimmed);
            }
        } else {
            if !description.is_empty() && !trimmed.is_empty() {
                description.push(' ');
            }
            description.push_str(trimmed);
        }
    }

    if let Some((name, text)) = current_tag {
        tags.push(DocTag { name, text });
    }

    DocBlock {
        description: description.trim().to_string(),
        tags,
    }
}

/// Parse and return only the description.
pub fn description(raw: &str) -> String {
    parse(raw).description
}

fn strip_delimiters(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(body) = trimmed.strip_prefix("/*") {
        body.strip_suffix("*/").unwrap_or(body).to_string()
    } else {
        // One or more line comments.
        trimmed
            .lines()
            .map(|l| l.trim().trim_start_matches("//").trim())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_block() {
        assert_eq!(description("/** The button label. */"), "The button label.");
    }

    #[test]
    fn test_multi_line_block_with_gutter() {
        let raw = "/**\n * Size of the avatar.\n * Accepts tailwind classes.\n */";
        assert_eq!(
            description(raw),
            "Size of the avatar. Accepts tailwind classes."
        );
    }

    #[test]
    fn test_line_comment() {
        assert_eq!(description("// fallback text"), "fallback text");
    }

    #[test]
    fn test_tags() {
        let block = parse("/**\n * Emits on change.\n * @param value the new value\n * @deprecated use update instead\n */");
        assert_eq!(block.description, "Emits on change.");
        assert_eq!(block.tag("param"), Some("value the new value"));
        assert_eq!(block.tag("deprecated"), Some("use update instead"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(description(""), "");
        assert_eq!(description("/**/"), "");
    }
}
