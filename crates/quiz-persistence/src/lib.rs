//! quiz-persistence
//!
//! Implementación durable de `ProgressStore` sobre un archivo JSON, más la
//! configuración desde entorno (`.env`) y los errores de persistencia.
//!
//! Módulos:
//! - `file_store`: un registro por clave en `<dir>/<key>.json`.
//! - `config`: carga de `QUIZ_PROGRESS_DIR` / `QUIZ_PROGRESS_KEY`.
//! - `error`: errores de E/S y serialización.

pub mod config;
pub mod error;
pub mod file_store;

pub use config::{init_dotenv, StoreConfig};
pub use error::PersistenceError;
pub use file_store::FileProgressStore;
