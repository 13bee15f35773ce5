//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`)
//! con los tiempos de transición y la ubicación del progreso.
use std::env;

use log::warn;
use once_cell::sync::Lazy;
use quiz_core::constants::{DEFAULT_AUTO_ADVANCE_MS, EXIT_DELAY_MS, EXIT_DURATION_MS};
use quiz_core::TransitionTimings;
use quiz_persistence::StoreConfig;

use crate::errors::AppError;

/// Configuración global de la aplicación.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Tiempos de salida/entrada y avance temporizado.
    pub timings: TransitionTimings,
    /// Dónde se guarda el registro de progreso.
    pub store: StoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { timings: TransitionTimings::default(),
               store: StoreConfig::default() }
    }
}

fn millis_var(name: &str, default: u64) -> Result<u64, AppError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim()
                                                 .parse()
                                                 .map_err(|_| AppError::Config(format!("{name}={raw}"))),
        _ => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        quiz_persistence::init_dotenv();
        let timings = TransitionTimings::from_millis(millis_var("QUIZ_EXIT_DELAY_MS", EXIT_DELAY_MS)?,
                                                     millis_var("QUIZ_EXIT_DURATION_MS", EXIT_DURATION_MS)?,
                                                     millis_var("QUIZ_AUTO_ADVANCE_MS", DEFAULT_AUTO_ADVANCE_MS)?);
        Ok(Self { timings,
                  store: StoreConfig::from_env() })
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez. Un
/// valor inválido se registra y se usan los valores por defecto.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    AppConfig::from_env().unwrap_or_else(|e| {
                             warn!("{e}; using default configuration");
                             AppConfig::default()
                         })
});
