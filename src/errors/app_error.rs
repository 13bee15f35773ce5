use thiserror::Error;

use quiz_core::QuizError;
use quiz_persistence::PersistenceError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de layout: {0}")]
    Layout(#[from] QuizError),
    #[error("Error de persistencia: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error al serializar el informe: {0}")]
    Report(#[from] serde_json::Error),
}
