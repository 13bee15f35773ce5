//! Errores específicos del core.
//!
//! El controlador absorbe estos errores (se registran con `log`) y degrada a
//! "quedarse en el paso actual" o "volver al inicio"; sólo las APIs de
//! construcción (layout) los devuelven al llamador.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum QuizError {
    #[error("duplicate step id: {0}")] DuplicateStep(String),
    #[error("duplicate field locator: {0}")] DuplicateField(String),
    #[error("unknown field locator: {0}")] UnknownField(String),
    #[error("section has no steps: {0}")] EmptySection(String),
    #[error("invalid step index {index} for a sequence of {len}")] InvalidStepIndex { index: usize, len: usize },
    #[error("malformed persisted state: {0}")] MalformedState(String),
}
