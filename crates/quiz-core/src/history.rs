//! Pila de historia para la navegación hacia atrás.
use crate::model::HistorySnapshot;

/// Registro LIFO de snapshots. Cada entrada refleja el paso de origen de
/// una transición hacia delante.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    entries: Vec<HistorySnapshot>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: HistorySnapshot) {
        self.entries.push(snapshot);
    }

    pub fn pop(&mut self) -> Option<HistorySnapshot> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
