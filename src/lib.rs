//! quizflow
//!
//! Librería de integración del quiz:
//! - `config`: configuración global (`CONFIG`) desde `.env`.
//! - `errors`: errores de aplicación.
//! - `sample`: layout de demostración con ambas ramas.
//! - `app`: `QuizApp`, controlador + colaboradores visuales conectados.
//!
//! Puede usarse desde `main.rs` o por otros clientes.

pub mod app;
pub mod config;
pub mod errors;
pub mod sample;

pub use app::{DemoReport, QuizApp};
pub use config::{AppConfig, CONFIG};
pub use errors::AppError;

#[cfg(test)]
mod tests {
    use super::errors::AppError;
    use quiz_core::QuizError;

    #[test]
    fn app_error_messages() {
        let e = AppError::from(QuizError::EmptySection("genderSelector".into())).to_string();
        assert_eq!(e, "Error de layout: section has no steps: genderSelector");
        let c = AppError::Config("QUIZ_EXIT_DELAY_MS=abc".into()).to_string();
        assert_eq!(c, "Error de configuración: QUIZ_EXIT_DELAY_MS=abc");
    }
}
