// Extraction Errors
//
// Typed errors for the parsing layer. Only whole-file parse failure is an
// error; missing declarations are empty results by contract.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The source could not be parsed into a syntax tree. Fatal for the
    /// file, caught at the per-folder orchestration level.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
