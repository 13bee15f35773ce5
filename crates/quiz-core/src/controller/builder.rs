//! Builder para `StepController`.
//!
//! Reúne el layout, la superficie, el store y los colaboradores; `build`
//! arranca el controlador (restaura progreso o empieza de cero) y deja el
//! primer paso activo.
use uuid::Uuid;

use super::core::StepController;
use super::transition::TransitionTimings;
use crate::layout::QuizLayout;
use crate::notify::{PresentationJournal, PresentationNotifier};
use crate::store::{InMemoryProgressStore, ProgressStore};
use crate::surface::{InputSurface, MemorySurface};

pub struct ControllerBuilder<S: ProgressStore, D: InputSurface> {
    layout: QuizLayout,
    surface: D,
    store: S,
    timings: TransitionTimings,
    session_id: Option<Uuid>,
    notifiers: Vec<Box<dyn PresentationNotifier>>,
}

impl<S: ProgressStore, D: InputSurface> ControllerBuilder<S, D> {
    pub fn timings(mut self, timings: TransitionTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Fija el id de sesión del journal (por defecto uno aleatorio).
    pub fn session_id(mut self, id: Uuid) -> Self {
        self.session_id = Some(id);
        self
    }

    /// Registra un colaborador. Recibe también los eventos del arranque.
    pub fn notifier(mut self, notifier: Box<dyn PresentationNotifier>) -> Self {
        self.notifiers.push(notifier);
        self
    }

    pub fn build(self) -> StepController<S, D> {
        let journal = match self.session_id {
            Some(id) => PresentationJournal::new(id),
            None => PresentationJournal::default(),
        };
        let mut controller = StepController::new_parts(self.layout, self.surface, self.store, self.timings, journal, self.notifiers);
        controller.boot();
        controller
    }
}

impl<S: ProgressStore, D: InputSurface> StepController<S, D> {
    #[inline]
    pub fn builder(layout: QuizLayout, surface: D, store: S) -> ControllerBuilder<S, D> {
        ControllerBuilder { layout,
                            surface,
                            store,
                            timings: TransitionTimings::default(),
                            session_id: None,
                            notifiers: Vec::new() }
    }
}

impl StepController<InMemoryProgressStore, MemorySurface> {
    /// Controlador con store y superficie en memoria.
    #[inline]
    pub fn in_memory(layout: QuizLayout) -> ControllerBuilder<InMemoryProgressStore, MemorySurface> {
        let surface = MemorySurface::from_layout(&layout);
        Self::builder(layout, surface, InMemoryProgressStore::new())
    }
}
