use thiserror::Error;

use crate::catalog::CatalogError;
use crate::loader::DecodeError;

/// Failures that end the session.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("cannot resolve {path}: {source}")]
    Path {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("window error: {0}")]
    Window(String),
    #[error("cannot start background process: {0}")]
    Detach(#[source] std::io::Error),
}

impl ViewerError {
    pub fn window(err: impl std::fmt::Display) -> Self {
        Self::Window(err.to_string())
    }
}
