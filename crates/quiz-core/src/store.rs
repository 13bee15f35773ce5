//! Almacenamiento del progreso del visitante.
//!
//! Un único registro bajo una clave fija. Las operaciones del trait no
//! fallan hacia el controlador: una implementación que no puede leer o
//! escribir lo registra y se comporta como un almacén vacío.
use log::warn;

use crate::model::PersistedState;

pub trait ProgressStore {
    /// Registro guardado; `None` si no existe o está corrupto.
    fn load(&self) -> Option<PersistedState>;
    fn save(&mut self, state: &PersistedState);
    fn clear(&mut self);
}

/// Store en memoria. Guarda el JSON tal cual para que los tests puedan
/// inyectar registros corruptos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProgressStore {
    raw: Option<String>,
    pub saves: usize,
}

impl InMemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { raw: Some(raw.into()),
               saves: 0 }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl ProgressStore for InMemoryProgressStore {
    fn load(&self) -> Option<PersistedState> {
        let raw = self.raw.as_deref()?;
        match PersistedState::from_json(raw) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!("discarding malformed progress record: {}", e);
                None
            }
        }
    }

    fn save(&mut self, state: &PersistedState) {
        match state.to_json() {
            Ok(json) => {
                self.raw = Some(json);
                self.saves += 1;
            }
            Err(e) => warn!("progress record not saved: {}", e),
        }
    }

    fn clear(&mut self) {
        self.raw = None;
    }
}

impl<T: ProgressStore + ?Sized> ProgressStore for Box<T> {
    fn load(&self) -> Option<PersistedState> {
        (**self).load()
    }

    fn save(&mut self, state: &PersistedState) {
        (**self).save(state)
    }

    fn clear(&mut self) {
        (**self).clear()
    }
}
