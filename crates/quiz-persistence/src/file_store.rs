//! `ProgressStore` sobre un archivo JSON.
//!
//! Las APIs `try_*` devuelven `PersistenceError`; la implementación del
//! trait las absorbe con `log::warn!` porque un fallo de almacenamiento
//! nunca debe interrumpir la navegación.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use quiz_core::{PersistedState, ProgressStore};

use crate::config::StoreConfig;
use crate::error::PersistenceError;

#[derive(Debug, Clone)]
pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(cfg: &StoreConfig) -> Self {
        Self::new(cfg.path())
    }

    pub fn from_env() -> Self {
        Self::from_config(&StoreConfig::from_env())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lee el registro. `Ok(None)` si el archivo no existe.
    pub fn try_load(&self) -> Result<Option<PersistedState>, PersistenceError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistenceError::io(&self.path, e)),
        };
        let record = PersistedState::from_json(&raw)?;
        // Valida el invariante de rama antes de aceptarlo.
        record.clone().into_flow_state()?;
        Ok(Some(record))
    }

    /// Escribe el registro de forma atómica (archivo temporal + rename).
    pub fn try_save(&self, state: &PersistedState) -> Result<(), PersistenceError> {
        let json = state.to_json()?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| PersistenceError::io(dir, e))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| PersistenceError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| PersistenceError::io(&self.path, e))?;
        debug!("progress saved to {}", self.path.display());
        Ok(())
    }

    pub fn try_clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::io(&self.path, e)),
        }
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self) -> Option<PersistedState> {
        match self.try_load() {
            Ok(record) => record,
            Err(e) if e.is_malformed() => {
                warn!("discarding malformed progress record at {}: {}", self.path.display(), e);
                None
            }
            Err(e) => {
                warn!("progress could not be read: {}", e);
                None
            }
        }
    }

    fn save(&mut self, state: &PersistedState) {
        if let Err(e) = self.try_save(state) {
            warn!("progress could not be saved: {}", e);
        }
    }

    fn clear(&mut self) {
        if let Err(e) = self.try_clear() {
            warn!("progress could not be cleared: {}", e);
        }
    }
}
