//! Registro durable del progreso.
//!
//! Forma JSON: `{ "selectedPath": "male"|null, "bodyType": "..."|null,
//! "currentStep": n }`. `onContact` sólo se escribe cuando es verdadero para
//! no alterar la forma mínima. Se acepta `currentBodyType` como alias de
//! lectura por compatibilidad con registros antiguos.
use serde::{Deserialize, Serialize};

use super::flow::{FlowState, QuizPath};
use crate::errors::QuizError;

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub selected_path: Option<QuizPath>,
    #[serde(default, alias = "currentBodyType")]
    pub body_type: Option<String>,
    #[serde(default)]
    pub current_step: usize,
    #[serde(default, skip_serializing_if = "is_false")]
    pub on_contact: bool,
}

impl PersistedState {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Convierte el registro en un `FlowState` validando el invariante de
    /// rama. El índice se valida más tarde contra la secuencia resuelta.
    pub fn into_flow_state(self) -> Result<FlowState, QuizError> {
        if self.body_type.is_some() && self.selected_path.is_none() {
            return Err(QuizError::MalformedState("bodyType without selectedPath".into()));
        }
        if self.on_contact && self.selected_path.is_none() {
            return Err(QuizError::MalformedState("contact stage without selectedPath".into()));
        }
        Ok(FlowState { selected_path: self.selected_path,
                       body_type: self.body_type.filter(|b| !b.is_empty()),
                       current_step: self.current_step,
                       on_contact: self.on_contact })
    }
}

impl From<&FlowState> for PersistedState {
    fn from(state: &FlowState) -> Self {
        Self { selected_path: state.selected_path,
               body_type: state.body_type.clone(),
               current_step: state.current_step,
               on_contact: state.on_contact }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_minimal_shape() {
        let state = FlowState { selected_path: Some(QuizPath::Male),
                                body_type: Some("athletic".into()),
                                current_step: 3,
                                on_contact: false };
        let json = PersistedState::from(&state).to_json().unwrap();
        assert_eq!(json, r#"{"selectedPath":"male","bodyType":"athletic","currentStep":3}"#);
    }

    #[test]
    fn accepts_legacy_body_type_key() {
        let rec = PersistedState::from_json(r#"{"selectedPath":"female","currentBodyType":"curvy","currentStep":1}"#).unwrap();
        assert_eq!(rec.body_type.as_deref(), Some("curvy"));
        let state = rec.into_flow_state().unwrap();
        assert_eq!(state.selected_path, Some(QuizPath::Female));
    }

    #[test]
    fn rejects_body_type_without_path() {
        let rec = PersistedState::from_json(r#"{"selectedPath":null,"bodyType":"slim","currentStep":0}"#).unwrap();
        assert!(matches!(rec.into_flow_state(), Err(QuizError::MalformedState(_))));
    }
}
