//! Campos interactivos del documento y sus valores.
//!
//! Un `FieldLocator` debe poder volver a encontrar el mismo elemento después
//! de que el host reconstruya el contenido; se deriva con la misma
//! preferencia que un selector único: `#id`, luego `[name="…"]`, luego
//! `tag.clase1.clase2`.
use std::fmt;

use serde::{Deserialize, Serialize};

use super::flow::QuizPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Radio,
    Checkbox,
    Text,
    /// Slider / `input[type=range]`.
    Range,
    Select,
    TextArea,
}

impl FieldKind {
    /// Campo cuyo valor es un estado de selección booleano.
    pub fn is_toggle(&self) -> bool {
        matches!(self, FieldKind::Radio | FieldKind::Checkbox)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::Select => "select",
            FieldKind::TextArea => "textarea",
            _ => "input",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldLocator(String);

impl FieldLocator {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldLocator {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Valor capturado de un campo: booleano para toggles, texto para el resto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Toggle(bool),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, FieldValue::Toggle(true))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Toggle(_) => None,
        }
    }

    /// Valor neutro para un campo recién creado.
    pub fn empty_for(kind: FieldKind) -> Self {
        if kind.is_toggle() {
            FieldValue::Toggle(false)
        } else {
            FieldValue::Text(String::new())
        }
    }
}

/// Descripción de un campo del marcado y de sus atributos de rol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub id: Option<String>,
    pub name: Option<String>,
    /// Atributo `value` (radios/checkboxes de un mismo grupo).
    pub value: Option<String>,
    pub classes: Vec<String>,
    /// Valor inicial del documento.
    pub initial: Option<FieldValue>,
    /// `gender-path`: opción del selector de género.
    pub gender_path: Option<QuizPath>,
    /// `data-option`: opción de un paso `OptionChoice`.
    pub option: Option<String>,
    /// `body-type`: sub-rama elegida en un paso `BodyGoal`.
    pub body_type: Option<String>,
}

impl FieldSpec {
    pub fn new(kind: FieldKind) -> Self {
        Self { kind,
               id: None,
               name: None,
               value: None,
               classes: Vec::new(),
               initial: None,
               gender_path: None,
               option: None,
               body_type: None }
    }

    /// Radio de un grupo `name` con su `value`.
    pub fn radio(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut spec = Self::new(FieldKind::Radio);
        spec.name = Some(name.into());
        spec.value = Some(value.into());
        spec
    }

    pub fn checkbox(id: impl Into<String>) -> Self {
        Self::new(FieldKind::Checkbox).with_id(id)
    }

    pub fn text(id: impl Into<String>) -> Self {
        Self::new(FieldKind::Text).with_id(id)
    }

    pub fn range(id: impl Into<String>) -> Self {
        Self::new(FieldKind::Range).with_id(id).with_class("slider")
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_initial(mut self, value: FieldValue) -> Self {
        self.initial = Some(value);
        self
    }

    pub fn with_gender_path(mut self, path: QuizPath) -> Self {
        self.gender_path = Some(path);
        self
    }

    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.option = Some(option.into());
        self
    }

    pub fn with_body_type(mut self, body_type: impl Into<String>) -> Self {
        self.body_type = Some(body_type.into());
        self
    }

    /// Slider (por tipo o por clase `slider`): se protege de escrituras
    /// redundantes al restaurar.
    pub fn is_range(&self) -> bool {
        self.kind == FieldKind::Range || self.classes.iter().any(|c| c == "slider")
    }

    /// Localizador estable. Los toggles sin `id` que comparten `name` se
    /// distinguen por su `value`; si no, todo el grupo colapsaría en un
    /// único localizador.
    pub fn locator(&self) -> FieldLocator {
        if let Some(id) = self.id.as_deref().filter(|s| !s.is_empty()) {
            return FieldLocator::new(format!("#{id}"));
        }
        if let Some(name) = self.name.as_deref().filter(|s| !s.is_empty()) {
            return match (self.kind.is_toggle(), self.value.as_deref()) {
                (true, Some(value)) => FieldLocator::new(format!("[name=\"{name}\"][value=\"{value}\"]")),
                _ => FieldLocator::new(format!("[name=\"{name}\"]")),
            };
        }
        let mut raw = self.kind.tag().to_string();
        for class in self.classes.iter().filter(|c| !c.trim().is_empty()) {
            raw.push('.');
            raw.push_str(class.trim());
        }
        FieldLocator::new(raw)
    }

    pub fn initial_value(&self) -> FieldValue {
        self.initial.clone().unwrap_or_else(|| FieldValue::empty_for(self.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_prefers_id_then_name_then_structure() {
        let by_id = FieldSpec::text("email").with_name("contact_email");
        assert_eq!(by_id.locator().as_str(), "#email");

        let by_name = FieldSpec::new(FieldKind::Text).with_name("age");
        assert_eq!(by_name.locator().as_str(), "[name=\"age\"]");

        let radio = FieldSpec::radio("goal", "lose");
        assert_eq!(radio.locator().as_str(), "[name=\"goal\"][value=\"lose\"]");

        let bare = FieldSpec::new(FieldKind::TextArea).with_class("notes").with_class("wide");
        assert_eq!(bare.locator().as_str(), "textarea.notes.wide");
    }

    #[test]
    fn field_values_serialize_as_plain_json() {
        let json = serde_json::to_string(&vec![FieldValue::Toggle(true), FieldValue::text("82")]).unwrap();
        assert_eq!(json, "[true,\"82\"]");
        let back: Vec<FieldValue> = serde_json::from_str(&json).unwrap();
        assert!(back[0].is_checked());
        assert_eq!(back[1].as_text(), Some("82"));
    }
}
