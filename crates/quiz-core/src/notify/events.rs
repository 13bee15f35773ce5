//! Eventos de presentación emitidos por el controlador.
//!
//! Es el contrato observable hacia los colaboradores visuales (animaciones,
//! confeti, insignias de recomendación). El controlador empuja los cambios;
//! nadie sondea el estado del documento.
use serde::{Deserialize, Serialize};

use crate::model::{FieldLocator, FieldValue, QuizPath, SectionId, StepId};
use crate::recommend::Recommendation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PresentationEvent {
    /// Un paso pasó a ser el activo.
    #[serde(rename_all = "camelCase")]
    StepActivated { step_id: StepId },
    /// El paso activo comenzó su salida.
    #[serde(rename_all = "camelCase")]
    StepDeactivated { step_id: StepId },
    ConfettiRequested,
    /// `category` es `None` cuando no hay recomendación válida.
    RecommendationChanged {
        gender: QuizPath,
        category: Option<Recommendation>,
    },
    /// Cambió el contenedor visible.
    SectionShown { section: SectionId },
    /// Se pidió recalcular el alto del contenedor.
    #[serde(rename_all = "camelCase")]
    LayoutRequested { step_id: StepId },
    ProgressChanged { position: usize, total: usize },
    /// Escritura programática sobre un campo.
    FieldChanged {
        locator: FieldLocator,
        value: FieldValue,
    },
}

impl PresentationEvent {
    /// Código compacto de una letra para trazas y aserciones.
    pub fn code(&self) -> &'static str {
        match self {
            PresentationEvent::StepActivated { .. } => "A",
            PresentationEvent::StepDeactivated { .. } => "D",
            PresentationEvent::ConfettiRequested => "C",
            PresentationEvent::RecommendationChanged { .. } => "R",
            PresentationEvent::SectionShown { .. } => "S",
            PresentationEvent::LayoutRequested { .. } => "L",
            PresentationEvent::ProgressChanged { .. } => "P",
            PresentationEvent::FieldChanged { .. } => "F",
        }
    }
}
