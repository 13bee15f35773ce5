//! quiz-core: motor de navegación de un quiz ramificado de varios pasos.
pub mod branch;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod history;
pub mod layout;
pub mod model;
pub mod notify;
pub mod recommend;
pub mod scheduler;
pub mod snapshot;
pub mod store;
pub mod surface;

pub use branch::BranchResolver;
pub use controller::{ControllerBuilder, Phase, StepController, TransitionPhase, TransitionTimings, UserAction};
pub use errors::QuizError;
pub use history::HistoryStack;
pub use layout::{QuizLayout, RecommendationInputs};
pub use model::{FieldKind, FieldLocator, FieldSpec, FieldValue, FlowState, PersistedState, QuizPath, SectionId, StepId,
                StepKind, StepSequence, StepSpec};
pub use notify::{PresentationEvent, PresentationJournal, PresentationNotifier, RecordingNotifier};
pub use recommend::{recommend, Recommendation};
pub use scheduler::{Scheduler, TaskId};
pub use store::{InMemoryProgressStore, ProgressStore};
pub use surface::{InputSurface, MemorySurface};
