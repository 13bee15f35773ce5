//! Estado del flujo (`FlowState`) y ramas de primer nivel.
//!
//! `FlowState` es propiedad exclusiva del `StepController`; el resto de
//! componentes lo reciben por referencia o devuelven uno nuevo.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Rama elegida en el selector de género.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizPath {
    Male,
    Female,
}

impl QuizPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizPath::Male => "male",
            QuizPath::Female => "female",
        }
    }

    /// Interpreta el valor de un atributo `gender-path`. Valores
    /// desconocidos no seleccionan ninguna rama.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "male" => Some(QuizPath::Male),
            "female" => Some(QuizPath::Female),
            _ => None,
        }
    }
}

impl fmt::Display for QuizPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contenedor visible del documento. Sólo uno está visible a la vez.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionId {
    GenderSelector,
    Male,
    Female,
    Contact,
}

impl From<QuizPath> for SectionId {
    fn from(path: QuizPath) -> Self {
        match path {
            QuizPath::Male => SectionId::Male,
            QuizPath::Female => SectionId::Female,
        }
    }
}

/// Posición del visitante dentro del quiz.
///
/// Invariantes:
/// - `body_type` sólo existe si `selected_path` existe.
/// - `current_step` es un índice válido de la secuencia resuelta para este
///   estado (lo garantiza el controlador, no este tipo).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowState {
    pub selected_path: Option<QuizPath>,
    pub body_type: Option<String>,
    pub current_step: usize,
    /// El visitante ya fue derivado al formulario de contacto.
    #[serde(default)]
    pub on_contact: bool,
}

impl FlowState {
    /// Estado inicial: ninguna rama elegida, primer paso del selector.
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn for_path(path: QuizPath) -> Self {
        Self { selected_path: Some(path),
               ..Self::default() }
    }

    pub fn is_initial(&self) -> bool {
        *self == Self::initial()
    }

    /// Sección que debe estar visible para este estado.
    pub fn section(&self) -> SectionId {
        if self.on_contact {
            return SectionId::Contact;
        }
        match self.selected_path {
            Some(path) => path.into(),
            None => SectionId::GenderSelector,
        }
    }

    /// Copia del estado apuntando a otro índice.
    pub fn at(&self, index: usize) -> Self {
        Self { current_step: index,
               ..self.clone() }
    }
}
