//! Superficie de entrada: valores vivos de los campos del documento.
//!
//! El controlador nunca lee el documento directamente; trabaja contra
//! `InputSurface`. `MemorySurface` es la implementación por defecto (tests,
//! demo) y respeta la exclusividad de los radios de un mismo grupo.
use indexmap::IndexMap;

use crate::layout::QuizLayout;
use crate::model::{FieldKind, FieldLocator, FieldValue};

pub trait InputSurface {
    /// Localizadores presentes actualmente, en orden de documento.
    fn locators(&self) -> Vec<FieldLocator>;
    /// Valor actual; `None` si el campo ya no existe.
    fn value(&self, locator: &FieldLocator) -> Option<FieldValue>;
    /// Escribe un valor. Devuelve `false` si el campo no existe.
    fn set_value(&mut self, locator: &FieldLocator, value: FieldValue) -> bool;
}

#[derive(Debug, Clone)]
struct Slot {
    value: FieldValue,
    radio_group: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    slots: IndexMap<FieldLocator, Slot>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crea la superficie con los valores iniciales de todos los campos.
    pub fn from_layout(layout: &QuizLayout) -> Self {
        let slots = layout.fields()
                          .map(|(loc, spec)| {
                              let radio_group = match spec.kind {
                                  FieldKind::Radio => spec.name.clone(),
                                  _ => None,
                              };
                              (loc.clone(),
                               Slot { value: spec.initial_value(),
                                      radio_group })
                          })
                          .collect();
        Self { slots }
    }

    /// Quita un campo (simula un nodo que desaparece del documento).
    pub fn remove(&mut self, locator: &FieldLocator) -> Option<FieldValue> {
        self.slots.shift_remove(locator).map(|s| s.value)
    }

    pub fn insert(&mut self, locator: FieldLocator, value: FieldValue) {
        self.slots.insert(locator, Slot { value, radio_group: None });
    }

    pub fn is_checked(&self, locator: &FieldLocator) -> bool {
        self.slots.get(locator).is_some_and(|s| s.value.is_checked())
    }
}

impl InputSurface for MemorySurface {
    fn locators(&self) -> Vec<FieldLocator> {
        self.slots.keys().cloned().collect()
    }

    fn value(&self, locator: &FieldLocator) -> Option<FieldValue> {
        self.slots.get(locator).map(|s| s.value.clone())
    }

    fn set_value(&mut self, locator: &FieldLocator, value: FieldValue) -> bool {
        let Some(group) = self.slots.get(locator).map(|s| s.radio_group.clone()) else {
            return false;
        };
        if let (Some(group), true) = (group, value.is_checked()) {
            for (loc, slot) in self.slots.iter_mut() {
                if loc != locator && slot.radio_group.as_deref() == Some(group.as_str()) {
                    slot.value = FieldValue::Toggle(false);
                }
            }
        }
        if let Some(slot) = self.slots.get_mut(locator) {
            slot.value = value;
        }
        true
    }
}
