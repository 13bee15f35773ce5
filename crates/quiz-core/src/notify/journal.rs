use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PresentationEvent;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub seq: u64, // orden de emisión dentro de la sesión
    pub session_id: Uuid,
    pub event: PresentationEvent,
    pub ts: DateTime<Utc>, // metadato, no participa en comparaciones de tests
}

/// Registro append-only de todas las notificaciones de una sesión.
#[derive(Debug, Clone)]
pub struct PresentationJournal {
    session_id: Uuid,
    entries: Vec<JournalEntry>,
}

impl Default for PresentationJournal {
    fn default() -> Self {
        Self::new(Uuid::new_v4())
    }
}

impl PresentationJournal {
    pub fn new(session_id: Uuid) -> Self {
        Self { session_id,
               entries: Vec::new() }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn append(&mut self, event: PresentationEvent) -> &JournalEntry {
        let seq = self.entries.len() as u64;
        self.entries.push(JournalEntry { seq,
                                         session_id: self.session_id,
                                         event,
                                         ts: Utc::now() });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn events(&self) -> Vec<PresentationEvent> {
        self.entries.iter().map(|e| e.event.clone()).collect()
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.event.code()).collect()
    }

    /// Entradas a partir de `seq` (inclusive).
    pub fn since(&self, seq: u64) -> &[JournalEntry] {
        let start = (seq as usize).min(self.entries.len());
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
