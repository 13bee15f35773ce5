//! Pasos del quiz: identidad, clasificación y secuencia activa.
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::field::FieldSpec;
use super::flow::QuizPath;

/// Identificador estable de un paso (atributo `id` o `data-step-id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(String);

impl StepId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StepId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StepId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Política de avance de un paso. Determina qué listeners instala el
/// controlador al activarlo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    /// Selector de género: marcar una opción fija la rama.
    GenderSelect,
    /// Elección de opción: "siguiente" + opción marcada filtra la secuencia.
    OptionChoice,
    /// Objetivo corporal: "siguiente" + tipo de cuerpo abre la sub-rama.
    BodyGoal,
    /// Sin botón "siguiente": cualquier toggle marcado avanza.
    RadioAutoAdvance,
    /// Con botón "siguiente"; exige un toggle marcado si el paso tiene.
    ButtonGatedAdvance,
    /// Sin botón ni toggles: avanza tras un retardo.
    TimedAutoAdvance,
    /// Formulario final; no avanza solo.
    ContactTerminal,
}

impl StepKind {
    /// Indica si el paso muestra un control "siguiente".
    pub fn has_next_control(&self) -> bool {
        matches!(self, StepKind::OptionChoice | StepKind::BodyGoal | StepKind::ButtonGatedAdvance)
    }

    /// Clasifica un paso a partir de los rasgos de su marcado, respetando
    /// el orden de prioridad del despacho: selector de género,
    /// elección de opción, objetivo corporal, y luego según botón/toggles.
    pub fn classify(traits: &StepTraits) -> StepKind {
        if traits.terminal {
            StepKind::ContactTerminal
        } else if traits.gender_selector {
            StepKind::GenderSelect
        } else if traits.option_choice {
            StepKind::OptionChoice
        } else if traits.body_goal.is_some() {
            StepKind::BodyGoal
        } else if !traits.has_next_control && traits.toggle_count > 0 {
            StepKind::RadioAutoAdvance
        } else if traits.has_next_control {
            StepKind::ButtonGatedAdvance
        } else {
            StepKind::TimedAutoAdvance
        }
    }
}

/// Rasgos observables del marcado de un paso.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepTraits {
    pub gender_selector: bool,
    pub option_choice: bool,
    pub body_goal: Option<QuizPath>,
    pub has_next_control: bool,
    pub toggle_count: usize,
    pub terminal: bool,
}

/// Descripción inmutable de un paso del documento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSpec {
    pub id: StepId,
    pub kind: StepKind,
    /// Sólo entra en la secuencia filtrada si coincide con la opción elegida.
    pub option_reveal: Option<String>,
    pub confetti: bool,
    /// Retardo propio del avance temporizado (`data-delay`).
    pub delay: Option<Duration>,
    pub has_next_control: bool,
    /// Botón propio para ir al contacto.
    pub has_contact_control: bool,
    /// Fuerza la derivación automática al contacto al terminar la rama.
    pub auto_contact: bool,
    /// Género asociado a un paso `BodyGoal` (atributo `body-goal`).
    pub goal_gender: Option<QuizPath>,
    pub fields: Vec<FieldSpec>,
}

impl StepSpec {
    pub fn new(id: impl Into<StepId>, kind: StepKind) -> Self {
        Self { id: id.into(),
               kind,
               option_reveal: None,
               confetti: false,
               delay: None,
               has_next_control: kind.has_next_control(),
               has_contact_control: false,
               auto_contact: false,
               goal_gender: None,
               fields: Vec::new() }
    }

    /// Construye el paso clasificando su tipo a partir del marcado.
    pub fn from_traits(id: impl Into<StepId>, traits: &StepTraits) -> Self {
        let mut spec = Self::new(id, StepKind::classify(traits));
        spec.has_next_control = traits.has_next_control;
        spec.goal_gender = traits.body_goal;
        spec
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn with_option_reveal(mut self, option: impl Into<String>) -> Self {
        self.option_reveal = Some(option.into());
        self
    }

    pub fn with_confetti(mut self) -> Self {
        self.confetti = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_contact_control(mut self) -> Self {
        self.has_contact_control = true;
        self
    }

    pub fn with_auto_contact(mut self) -> Self {
        self.auto_contact = true;
        self
    }

    pub fn with_goal_gender(mut self, gender: QuizPath) -> Self {
        self.goal_gender = Some(gender);
        self
    }

    pub fn toggles(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.kind.is_toggle())
    }

    pub fn toggle_count(&self) -> usize {
        self.toggles().count()
    }

    /// Se conserva en una secuencia filtrada por `option`.
    pub fn revealed_for(&self, option: &str) -> bool {
        match &self.option_reveal {
            None => true,
            Some(tag) => tag == option,
        }
    }
}

/// Secuencia ordenada de pasos activos. Se deriva de `FlowState` mediante
/// el `BranchResolver`; sólo se almacena dentro de los snapshots de historia.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepSequence(Vec<StepId>);

impl StepSequence {
    pub fn new(ids: Vec<StepId>) -> Self {
        Self(ids)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StepId> {
        self.0.get(index)
    }

    pub fn position(&self, id: &StepId) -> Option<usize> {
        self.0.iter().position(|s| s == id)
    }

    pub fn contains(&self, id: &StepId) -> bool {
        self.0.contains(id)
    }

    pub fn last(&self) -> Option<&StepId> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepId> {
        self.0.iter()
    }

    pub fn ids(&self) -> &[StepId] {
        &self.0
    }
}

impl FromIterator<StepId> for StepSequence {
    fn from_iter<T: IntoIterator<Item = StepId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
