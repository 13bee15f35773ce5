//! Resolución de la secuencia activa de pasos.
use log::debug;

use crate::layout::QuizLayout;
use crate::model::{FlowState, StepSequence};

/// Calcula la secuencia visible para un `FlowState`. No guarda estado; el
/// controlador la consulta cada vez que cambia una variable de ramificación.
#[derive(Debug, Clone, Copy)]
pub struct BranchResolver<'a> {
    layout: &'a QuizLayout,
}

impl<'a> BranchResolver<'a> {
    pub fn new(layout: &'a QuizLayout) -> Self {
        Self { layout }
    }

    pub fn resolve(&self, state: &FlowState) -> StepSequence {
        if state.on_contact {
            return StepSequence::new(self.layout.contact().to_vec());
        }
        let Some(path) = state.selected_path else {
            return StepSequence::new(self.layout.gender_selector().to_vec());
        };
        if let Some(body_type) = state.body_type.as_deref() {
            match self.layout.body_type_steps(path, body_type) {
                Some(steps) if !steps.is_empty() => return StepSequence::new(steps.to_vec()),
                _ => debug!("body type '{}' has no steps under {}, not narrowing", body_type, path),
            }
        }
        StepSequence::new(self.layout.path(path).all_steps())
    }

    /// Conserva los pasos sin etiqueta y los etiquetados con `option`, en su
    /// orden relativo original.
    pub fn filter_by_option(&self, sequence: &StepSequence, option: &str) -> StepSequence {
        sequence.iter()
                .filter(|id| self.layout.step(id).map_or(true, |s| s.revealed_for(option)))
                .cloned()
                .collect()
    }
}
