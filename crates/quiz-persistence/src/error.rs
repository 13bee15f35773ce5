//! Errores de persistencia.
//! Mapea errores de E/S y de serde a variantes semánticas.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error on {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("malformed progress record: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid progress record: {0}")]
    Invalid(#[from] quiz_core::QuizError),
}

impl PersistenceError {
    pub fn io(path: &std::path::Path, source: io::Error) -> Self {
        Self::Io { path: path.display().to_string(),
                   source }
    }

    /// Los errores de formato se tratan como "sin registro".
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Serialization(_) | Self::Invalid(_))
    }
}
