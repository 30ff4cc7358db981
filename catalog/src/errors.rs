use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog artifact {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog duplicate id: {0}")]
    Integrity(String),
}
