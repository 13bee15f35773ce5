//! Registro de suscripciones del paso activo.
//!
//! Cada activación instala los disparadores que corresponden al tipo del
//! paso y cada transición los revoca en bloque, de modo que nunca queda un
//! listener del paso anterior vivo.
use crate::model::{StepId, StepKind, StepSpec};
use crate::scheduler::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Marcar una opción de género fija la rama.
    GenderChoice,
    /// "Siguiente" con una opción `data-option` marcada.
    OptionNext,
    /// "Siguiente" con un tipo de cuerpo marcado.
    BodyGoalNext,
    /// Cualquier toggle del paso marcado avanza.
    AutoAdvanceOnToggle,
    /// "Siguiente" avanza; si `require_toggle`, exige un toggle marcado.
    GatedNext { require_toggle: bool },
    /// Avance temporizado pendiente en el planificador.
    TimedAdvance(TaskId),
    /// Botón propio hacia el formulario de contacto.
    ContactControl,
}

impl Trigger {
    fn is_next(&self) -> bool {
        matches!(self, Trigger::OptionNext | Trigger::BodyGoalNext | Trigger::GatedNext { .. })
    }
}

/// Disparadores sin temporizador para un paso. El avance temporizado lo
/// añade el controlador porque necesita el planificador.
pub(crate) fn triggers_for(spec: &StepSpec) -> Vec<Trigger> {
    let mut triggers = match spec.kind {
        StepKind::GenderSelect => vec![Trigger::GenderChoice],
        StepKind::OptionChoice => vec![Trigger::OptionNext],
        StepKind::BodyGoal => vec![Trigger::BodyGoalNext],
        StepKind::RadioAutoAdvance => vec![Trigger::AutoAdvanceOnToggle],
        StepKind::ButtonGatedAdvance => vec![Trigger::GatedNext { require_toggle: spec.toggle_count() > 0 }],
        StepKind::TimedAutoAdvance | StepKind::ContactTerminal => Vec::new(),
    };
    if spec.has_contact_control {
        triggers.push(Trigger::ContactControl);
    }
    triggers
}

#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    step: Option<StepId>,
    triggers: Vec<Trigger>,
}

impl ListenerRegistry {
    pub fn install(&mut self, step: StepId, triggers: Vec<Trigger>) {
        self.step = Some(step);
        self.triggers = triggers;
    }

    /// Quita todos los disparadores y los devuelve para que el llamador
    /// cancele los temporizadores asociados.
    pub fn revoke(&mut self) -> Vec<Trigger> {
        self.step = None;
        std::mem::take(&mut self.triggers)
    }

    pub fn step(&self) -> Option<&StepId> {
        self.step.as_ref()
    }

    pub fn has(&self, trigger: Trigger) -> bool {
        self.triggers.contains(&trigger)
    }

    pub fn next_trigger(&self) -> Option<Trigger> {
        self.triggers.iter().copied().find(Trigger::is_next)
    }

    pub fn timed_task(&self) -> Option<TaskId> {
        self.triggers.iter().find_map(|t| match t {
                                Trigger::TimedAdvance(id) => Some(*id),
                                _ => None,
                            })
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}
