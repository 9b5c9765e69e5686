use std::path::PathBuf;
use thiserror::Error;

/// Raised while building the catalog. These are configuration problems with the
/// datasets, never per-request failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("dataset file not found at: {0:?}")]
    NotFound(PathBuf),

    #[error("failed to read dataset file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no recipes loaded from {0:?}")]
    EmptyCatalog(PathBuf),

    #[error("invalid recipe '{id}': {reason}")]
    InvalidRecipe { id: String, reason: String },

    #[error("duplicate recipe id '{0}'")]
    DuplicateRecipe(String),
}
