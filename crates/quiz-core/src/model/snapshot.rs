//! Snapshots para deshacer: valores de campos + estado de flujo + secuencia.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::field::{FieldLocator, FieldValue};
use super::flow::FlowState;
use super::step::StepSequence;

/// Valores de todos los campos del documento, en orden de documento.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSnapshot(IndexMap<FieldLocator, FieldValue>);

impl FieldSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, locator: FieldLocator, value: FieldValue) {
        self.0.insert(locator, value);
    }

    pub fn get(&self, locator: &FieldLocator) -> Option<&FieldValue> {
        self.0.get(locator)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, FieldLocator, FieldValue> {
        self.0.iter()
    }
}

impl FromIterator<(FieldLocator, FieldValue)> for FieldSnapshot {
    fn from_iter<T: IntoIterator<Item = (FieldLocator, FieldValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Entrada de la pila de historia. Refleja el paso de *origen* de una
/// transición (se captura antes de mutar el estado).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub state: FlowState,
    pub sequence: StepSequence,
    pub fields: FieldSnapshot,
}
