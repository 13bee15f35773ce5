//! Configuración del almacenamiento desde variables de entorno.
//! `QUIZ_PROGRESS_DIR` (por defecto el directorio temporal del sistema) y
//! `QUIZ_PROGRESS_KEY` (por defecto `quizProgress`).

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use quiz_core::constants::PROGRESS_KEY;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub dir: PathBuf,
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { dir: env::temp_dir(),
               key: PROGRESS_KEY.to_string() }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let defaults = Self::default();
        let dir = env::var("QUIZ_PROGRESS_DIR").ok()
                                               .filter(|v| !v.trim().is_empty())
                                               .map(PathBuf::from)
                                               .unwrap_or(defaults.dir);
        let key = env::var("QUIZ_PROGRESS_KEY").ok()
                                               .filter(|v| !v.trim().is_empty())
                                               .unwrap_or(defaults.key);
        Self { dir, key }
    }

    /// Ruta del archivo del registro.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
