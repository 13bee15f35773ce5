use std::fs;

use quiz_core::{FlowState, PersistedState, ProgressStore, QuizPath};
use quiz_persistence::{FileProgressStore, PersistenceError, StoreConfig};

fn store_in(dir: &tempfile::TempDir) -> FileProgressStore {
    FileProgressStore::from_config(&StoreConfig { dir: dir.path().to_path_buf(),
                                                  key: "quizProgress".into() })
}

#[test]
fn save_load_clear_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    assert!(store.load().is_none());

    let state = FlowState { selected_path: Some(QuizPath::Male),
                            body_type: Some("athletic".into()),
                            current_step: 1,
                            on_contact: false };
    store.save(&PersistedState::from(&state));
    let raw = fs::read_to_string(dir.path().join("quizProgress.json")).unwrap();
    assert_eq!(raw, r#"{"selectedPath":"male","bodyType":"athletic","currentStep":1}"#);
    assert_eq!(store.load().unwrap().into_flow_state().unwrap(), state);

    store.clear();
    assert!(!dir.path().join("quizProgress.json").exists());
    assert!(store.load().is_none());
    // Limpiar dos veces no es un error.
    assert!(store.try_clear().is_ok());
}

#[test]
fn malformed_or_inconsistent_records_read_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    fs::write(store.path(), "{oops").unwrap();
    assert!(matches!(store.try_load(), Err(PersistenceError::Serialization(_))));
    assert!(store.load().is_none());

    fs::write(store.path(), r#"{"selectedPath":null,"bodyType":"slim","currentStep":0}"#).unwrap();
    assert!(matches!(store.try_load(), Err(PersistenceError::Invalid(_))));
    assert!(store.load().is_none());
}

#[test]
fn save_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileProgressStore::new(dir.path().join("nested/deeper/progress.json"));
    store.save(&PersistedState::from(&FlowState::initial()));
    assert!(store.path().exists());
    assert!(store.load().is_some());
}
