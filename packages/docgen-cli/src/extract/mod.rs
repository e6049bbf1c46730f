// Script Extraction
//
// Parses script text with oxc and pattern-matches declaration shapes to
// recover component metadata. Two variants cover the two authoring
// styles: `script_setup` for declarative macro calls (`defineProps<...>`)
// and `options` for plain object configuration.
//
// Failure policy: only whole-file parse failure is an error. Unmatched or
// malformed constructs are skipped and absent declarations yield empty
// vectors.

pub mod comments;
pub mod literals;
pub mod options;
pub mod script_setup;

use crate::error::ExtractError;
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;
use registry_docgen::entities::ComponentMetadata;
use std::path::Path;

/// Parse script text into a program. Script blocks from `.vue` files have
/// no extension to sniff, so everything parses as TypeScript.
pub(crate) fn parse_script<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    path: &Path,
) -> Result<Program<'a>, ExtractError> {
    let source_type = SourceType::from_path(path).unwrap_or_else(|_| SourceType::ts());
    let ret = Parser::new(allocator, source, source_type).parse();

    if ret.panicked {
        return Err(ExtractError::Parse {
            path: path.to_path_buf(),
            message: "parser panicked".to_string(),
        });
    }
    if let Some(error) = ret.errors.first() {
        return Err(ExtractError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        });
    }

    Ok(ret.program)
}

/// Extract metadata from a `<script setup>` block.
pub fn extract_setup_script(
    source: &str,
    path: &Path,
) -> Result<ComponentMetadata, ExtractError> {
    let allocator = Allocator::default();
    let program = parse_script(&allocator, source, path)?;
    Ok(script_setup::extract(&program, source))
}

/// Extract metadata from a plain script or `.ts` module.
pub fn extract_options_script(
    source: &str,
    path: &Path,
) -> Result<ComponentMetadata, ExtractError> {
    let allocator = Allocator::default();
    let program = parse_script(&allocator, source, path)?;
    Ok(options::extract(&program, source))
}
