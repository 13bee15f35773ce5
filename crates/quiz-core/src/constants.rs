//! Constantes del motor de pasos.
//!
//! Duraciones nominales de la transición entre pasos y claves estables del
//! almacenamiento. Los valores efectivos pueden sobreescribirse mediante
//! `TransitionTimings` (ver `controller::transition`).

/// Clave fija bajo la cual se guarda el progreso durable.
pub const PROGRESS_KEY: &str = "quizProgress";

/// Espera antes de iniciar la salida del paso activo.
pub const EXIT_DELAY_MS: u64 = 200;

/// Duración de la animación de salida.
pub const EXIT_DURATION_MS: u64 = 400;

/// Retardo por defecto de los pasos con avance temporizado.
pub const DEFAULT_AUTO_ADVANCE_MS: u64 = 2500;
