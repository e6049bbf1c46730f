// Doc Comment Attribution
//
// Finds the comment attached to a declaration. A comment belongs to a
// node when it is the nearest one ending before the node's span and only
// whitespace separates the two; anything else between them means the
// comment documents some other statement.

use oxc_ast::ast::Program;
use registry_docgen::docblock;

/// Description text of the doc comment attached to the node starting at
/// `node_start`. Misses yield an empty string.
pub fn doc_comment_for(program: &Program<'_>, source: &str, node_start: u32) -> String {
    let mut best: Option<(u32, u32)> = None;

    for comment in &program.comments {
        if comment.span.end <= node_start {
            match best {
                Some((_, end)) if end >= comment.span.end => {}
                _ => best = Some((comment.span.start, comment.span.end)),
            }
        }
    }

    let Some((start, end)) = best else {
        return String::new();
    };

    let gap = &source[end as usize..node_start as usize];
    if !gap.trim().is_empty() {
        return String::new();
    }

    docblock::description(&source[start as usize..end as usize])
}
