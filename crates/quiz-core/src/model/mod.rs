//! Modelos neutrales del quiz (estado de flujo, pasos, campos, snapshots).

pub mod field;
pub mod flow;
pub mod persisted;
pub mod snapshot;
pub mod step;

pub use field::{FieldKind, FieldLocator, FieldSpec, FieldValue};
pub use flow::{FlowState, QuizPath, SectionId};
pub use persisted::PersistedState;
pub use snapshot::{FieldSnapshot, HistorySnapshot};
pub use step::{StepId, StepKind, StepSequence, StepSpec, StepTraits};
