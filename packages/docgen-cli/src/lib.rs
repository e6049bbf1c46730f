//! Registry Docgen CLI
//!
//! Filesystem-facing half of the documentation pipeline: configuration,
//! SFC splitting, oxc-based script extraction, dependency mapping, folder
//! scanning and artifact output. The data model and pure-text analyses
//! live in `registry_docgen`.

pub mod config;
pub mod depmap;
pub mod error;
pub mod extract;
pub mod imports;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod sfc;
