//! Registry Docgen Core
//!
//! Data model and pure-text analyses for the component registry
//! documentation pipeline. Everything in this crate operates on immutable
//! strings and owned records; filesystem access and AST parsing live in
//! the CLI crate.

pub mod css_vars;
pub mod docblock;
pub mod entities;
pub mod html;
pub mod markdown;
pub mod template;
