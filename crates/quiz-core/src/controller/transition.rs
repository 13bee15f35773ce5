//! Fases de la transición entre pasos y tareas diferidas.
use std::time::Duration;

use crate::constants::{DEFAULT_AUTO_ADVANCE_MS, EXIT_DELAY_MS, EXIT_DURATION_MS};
use crate::model::StepId;

/// Duraciones efectivas de la transición.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimings {
    pub exit_delay: Duration,
    pub exit_duration: Duration,
    /// Retardo de los pasos temporizados sin `delay` propio.
    pub auto_advance: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self::from_millis(EXIT_DELAY_MS, EXIT_DURATION_MS, DEFAULT_AUTO_ADVANCE_MS)
    }
}

impl TransitionTimings {
    pub fn from_millis(exit_delay: u64, exit_duration: u64, auto_advance: u64) -> Self {
        Self { exit_delay: Duration::from_millis(exit_delay),
               exit_duration: Duration::from_millis(exit_duration),
               auto_advance: Duration::from_millis(auto_advance) }
    }
}

/// Sub-fase de una transición en curso.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Esperando para iniciar la salida del paso saliente.
    ExitPending,
    /// El paso saliente ya se desactivó; corre la animación de salida.
    Exited,
    /// Activando el paso entrante.
    EnterActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Transitioning(TransitionPhase),
}

impl Phase {
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Phase::Transitioning(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClearStage {
    First,
    Second,
}

/// Trabajo diferido del controlador.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Pending {
    ExitStart { outgoing: StepId, incoming: StepId },
    ExitFinish { incoming: StepId },
    AutoAdvance { step: StepId },
    ClearToggles { step: StepId, stage: ClearStage },
}
