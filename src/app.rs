//! `QuizApp`: el controlador de pasos con sus colaboradores visuales ya
//! conectados, sobre una superficie en memoria.
//!
//! El controlador y los colaboradores llevan relojes virtuales separados;
//! `advance` los mueve juntos y `settle` los vuelve a alinear después de
//! completar una transición.
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::info;
use quiz_adapters::{Animated, ConfettiLauncher, FillSpec, OptionHighlighter, ProgressIndicator, RecommendationBadges,
                    StepAnimations};
use quiz_core::{FieldLocator, FieldValue, FlowState, InputSurface, MemorySurface, PersistedState, ProgressStore, QuizLayout,
                QuizPath, StepController, StepId, TransitionTimings, UserAction};
use serde::Serialize;
use uuid::Uuid;

pub struct QuizApp<S: ProgressStore> {
    controller: StepController<S, MemorySurface>,
    animations: Rc<RefCell<StepAnimations>>,
    confetti: Rc<RefCell<ConfettiLauncher>>,
    badges: Rc<RefCell<RecommendationBadges>>,
    progress: Rc<RefCell<ProgressIndicator>>,
    highlight: Rc<RefCell<OptionHighlighter>>,
}

/// Resumen serializable de una sesión.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoReport {
    pub session_id: Uuid,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub events: usize,
    pub codes: String,
    pub state: PersistedState,
    pub active_step: Option<String>,
    pub progress_percent: f64,
    pub confetti_launches: usize,
    pub male_recommendation: Option<String>,
    pub female_recommendation: Option<String>,
    pub fills: serde_json::Value,
}

impl<S: ProgressStore> QuizApp<S> {
    pub fn new(layout: QuizLayout, fills: Vec<FillSpec>, store: S, timings: TransitionTimings) -> Self {
        let animations = Rc::new(RefCell::new(StepAnimations::new(fills)));
        let confetti = Rc::new(RefCell::new(ConfettiLauncher::new()));
        let badges = Rc::new(RefCell::new(RecommendationBadges::new()));
        let progress = Rc::new(RefCell::new(ProgressIndicator::new()));
        let highlight = Rc::new(RefCell::new(OptionHighlighter::new()));
        let surface = MemorySurface::from_layout(&layout);
        let session_id = Uuid::new_v4();
        let controller = StepController::builder(layout, surface, store).timings(timings)
                                                                        .session_id(session_id)
                                                                        .notifier(Box::new(animations.clone()))
                                                                        .notifier(Box::new(confetti.clone()))
                                                                        .notifier(Box::new(badges.clone()))
                                                                        .notifier(Box::new(progress.clone()))
                                                                        .notifier(Box::new(highlight.clone()))
                                                                        .build();
        info!("quiz session {} started at {:?}", session_id, controller.state());
        Self { controller,
               animations,
               confetti,
               badges,
               progress,
               highlight }
    }

    pub fn dispatch(&mut self, action: UserAction) -> bool {
        self.controller.dispatch(action)
    }

    pub fn check(&mut self, locator: &str) -> bool {
        self.dispatch(UserAction::Check(FieldLocator::from(locator)))
    }

    pub fn input(&mut self, locator: &str, value: &str) -> bool {
        self.dispatch(UserAction::Input(FieldLocator::from(locator), value.to_string()))
    }

    /// Avanza controlador y animaciones el mismo intervalo.
    pub fn advance(&mut self, dt: Duration) {
        self.controller.advance_time(dt);
        self.controller.render_frame();
        self.animations.borrow_mut().advance(dt);
        self.confetti.borrow_mut().advance(dt);
    }

    /// Completa la transición en curso y pone al día los relojes de las
    /// animaciones con el tiempo consumido.
    pub fn settle(&mut self) {
        let before = self.controller.now();
        self.controller.run_until_idle();
        let elapsed = self.controller.now().saturating_sub(before);
        self.animations.borrow_mut().advance(elapsed);
        self.confetti.borrow_mut().advance(elapsed);
    }

    pub fn controller(&self) -> &StepController<S, MemorySurface> {
        &self.controller
    }

    pub fn state(&self) -> &FlowState {
        self.controller.state()
    }

    pub fn active_step(&self) -> Option<&StepId> {
        self.controller.active_step()
    }

    pub fn field(&self, locator: &str) -> Option<FieldValue> {
        self.controller.surface().value(&FieldLocator::from(locator))
    }

    pub fn store(&self) -> &S {
        self.controller.store()
    }

    pub fn fill_width(&self, id: &str) -> f64 {
        self.animations.borrow().width(id)
    }

    pub fn confetti_launches(&self) -> usize {
        self.confetti.borrow().launches()
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress.borrow().percent()
    }

    pub fn badge(&self, gender: QuizPath) -> Option<String> {
        self.badges.borrow().shown(gender).map(|r| r.to_string())
    }

    pub fn is_highlighted(&self, locator: &str) -> bool {
        self.highlight.borrow().is_highlighted(&FieldLocator::from(locator))
    }

    pub fn report(&self) -> DemoReport {
        let journal = self.controller.journal();
        let entries = journal.entries();
        DemoReport { session_id: journal.session_id(),
                     started_at: entries.first().map(|e| e.ts),
                     finished_at: entries.last().map(|e| e.ts),
                     events: journal.len(),
                     codes: journal.codes().concat(),
                     state: PersistedState::from(self.controller.state()),
                     active_step: self.controller.active_step().map(|s| s.to_string()),
                     progress_percent: self.progress_percent(),
                     confetti_launches: self.confetti_launches(),
                     male_recommendation: self.badge(QuizPath::Male),
                     female_recommendation: self.badge(QuizPath::Female),
                     fills: self.animations.borrow().snapshot() }
    }
}
