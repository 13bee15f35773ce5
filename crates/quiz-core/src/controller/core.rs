//! Implementación del `StepController`.
use std::collections::HashMap;
use std::time::Duration;

use log::{debug, warn};

use super::listeners::{triggers_for, ListenerRegistry, Trigger};
use super::transition::{ClearStage, Pending, Phase, TransitionPhase, TransitionTimings};
use crate::branch::BranchResolver;
use crate::errors::QuizError;
use crate::history::HistoryStack;
use crate::layout::QuizLayout;
use crate::model::{FieldLocator, FieldSpec, FieldValue, FlowState, HistorySnapshot, PersistedState, QuizPath, SectionId,
                   StepId, StepKind, StepSequence};
use crate::notify::{PresentationEvent, PresentationJournal, PresentationNotifier};
use crate::recommend::{recommend_text, Recommendation};
use crate::scheduler::{Scheduler, TaskId};
use crate::snapshot;
use crate::store::ProgressStore;
use crate::surface::InputSurface;

/// Interacción del visitante tal como la entrega el host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Check(FieldLocator),
    Uncheck(FieldLocator),
    Input(FieldLocator, String),
    Next,
    Back,
    Contact,
    Restart,
}

/// Estado de destino de una transición.
#[derive(Debug, Clone)]
pub(crate) struct FlowTarget {
    pub state: FlowState,
    pub sequence: StepSequence,
}

/// Máquina de estados de navegación del quiz.
///
/// Dueño exclusivo del `FlowState`, la secuencia activa, la historia y el
/// registro de listeners. Todo el tiempo pasa por el `Scheduler` interno: el
/// host llama a `advance_time` / `render_frame` para que avance.
pub struct StepController<S, D>
    where S: ProgressStore,
          D: InputSurface
{
    layout: QuizLayout,
    surface: D,
    store: S,
    history: HistoryStack,
    state: FlowState,
    sequence: StepSequence,
    phase: Phase,
    active: Option<StepId>,
    section: Option<SectionId>,
    listeners: ListenerRegistry,
    scheduler: Scheduler<Pending>,
    timings: TransitionTimings,
    journal: PresentationJournal,
    notifiers: Vec<Box<dyn PresentationNotifier>>,
    recommendations: HashMap<QuizPath, Option<Recommendation>>,
}

impl<S, D> StepController<S, D>
    where S: ProgressStore,
          D: InputSurface
{
    pub(crate) fn new_parts(layout: QuizLayout,
                            surface: D,
                            store: S,
                            timings: TransitionTimings,
                            journal: PresentationJournal,
                            notifiers: Vec<Box<dyn PresentationNotifier>>)
                            -> Self {
        Self { layout,
               surface,
               store,
               history: HistoryStack::new(),
               state: FlowState::initial(),
               sequence: StepSequence::default(),
               phase: Phase::Idle,
               active: None,
               section: None,
               listeners: ListenerRegistry::default(),
               scheduler: Scheduler::new(),
               timings,
               journal,
               notifiers,
               recommendations: HashMap::new() }
    }

    /// Arranque: restaura el registro durable si es válido; si no, empieza
    /// desde el selector de género. Nunca apila historia.
    pub(crate) fn boot(&mut self) {
        let target = self.restored_target().unwrap_or_else(|| self.initial_target());
        if !self.show_step(target, false) {
            warn!("quiz could not show its first step");
        }
        for path in [QuizPath::Male, QuizPath::Female] {
            self.refresh_recommendation(path);
        }
    }

    fn restored_target(&self) -> Option<FlowTarget> {
        let record = self.store.load()?;
        let state = match record.into_flow_state() {
            Ok(state) => state,
            Err(e) => {
                warn!("ignoring stored progress: {}", e);
                return None;
            }
        };
        let sequence = self.resolver().resolve(&state);
        if state.current_step >= sequence.len() {
            let err = QuizError::InvalidStepIndex { index: state.current_step,
                                                    len: sequence.len() };
            warn!("ignoring stored progress: {}", err);
            return None;
        }
        Some(FlowTarget { state, sequence })
    }

    fn initial_target(&self) -> FlowTarget {
        let state = FlowState::initial();
        let sequence = self.resolver().resolve(&state);
        FlowTarget { state, sequence }
    }

    fn resolver(&self) -> BranchResolver<'_> {
        BranchResolver::new(&self.layout)
    }

    // ---------------------------------------------------------------------
    // Emisión
    // ---------------------------------------------------------------------

    fn emit(&mut self, event: PresentationEvent) {
        for notifier in self.notifiers.iter_mut() {
            notifier.notify(&event);
        }
        self.journal.append(event);
    }

    /// Añade un colaborador. Sólo recibe los eventos posteriores.
    pub fn add_notifier(&mut self, notifier: Box<dyn PresentationNotifier>) {
        self.notifiers.push(notifier);
    }

    fn show_section(&mut self) {
        let section = self.state.section();
        if self.section != Some(section) {
            self.section = Some(section);
            self.emit(PresentationEvent::SectionShown { section });
        }
    }

    // ---------------------------------------------------------------------
    // Transiciones
    // ---------------------------------------------------------------------

    /// Muestra el paso `target.state.current_step` de `target.sequence`.
    ///
    /// Devuelve `false` si la petición se descartó (transición en curso o
    /// índice inválido). La historia recibe el estado de *origen*; el
    /// almacenamiento recibe el de *destino*.
    pub(crate) fn show_step(&mut self, target: FlowTarget, push_history: bool) -> bool {
        if self.phase.is_transitioning() {
            debug!("show_step dropped: transition in progress");
            return false;
        }
        let Some(incoming) = target.sequence.get(target.state.current_step).cloned() else {
            debug!("show_step dropped: {}",
                   QuizError::InvalidStepIndex { index: target.state.current_step,
                                                 len: target.sequence.len() });
            return false;
        };

        self.phase = Phase::Transitioning(TransitionPhase::ExitPending);
        if push_history {
            let snapshot = self.capture();
            self.history.push(snapshot);
        }
        self.state = target.state;
        self.sequence = target.sequence;
        self.persist();
        self.revoke_listeners();
        self.show_section();

        match self.active.clone() {
            Some(outgoing) if outgoing != incoming => {
                self.scheduler.schedule(self.timings.exit_delay, Pending::ExitStart { outgoing, incoming });
            }
            _ => self.activate(incoming),
        }
        true
    }

    fn activate(&mut self, step_id: StepId) {
        self.phase = Phase::Transitioning(TransitionPhase::EnterActive);
        self.active = Some(step_id.clone());
        self.install_listeners(&step_id);
        self.emit(PresentationEvent::LayoutRequested { step_id: step_id.clone() });
        self.emit(PresentationEvent::ProgressChanged { position: self.state.current_step,
                                                       total: self.sequence.len() });
        self.emit(PresentationEvent::StepActivated { step_id: step_id.clone() });

        let (kind, goal_gender, confetti) = match self.layout.step(&step_id) {
            Some(spec) => (Some(spec.kind), spec.goal_gender, spec.confetti),
            None => (None, None, false),
        };
        if kind == Some(StepKind::BodyGoal) {
            if let Some(gender) = goal_gender.or(self.state.selected_path) {
                self.refresh_recommendation(gender);
            }
        }
        if confetti {
            self.emit(PresentationEvent::ConfettiRequested);
        }
        self.phase = Phase::Idle;
    }

    fn install_listeners(&mut self, step_id: &StepId) {
        let Some(spec) = self.layout.step(step_id) else {
            warn!("active step {} is not in the layout", step_id);
            return;
        };
        let mut triggers = triggers_for(spec);
        if spec.kind == StepKind::TimedAutoAdvance {
            let delay = spec.delay.unwrap_or(self.timings.auto_advance);
            let task = self.scheduler.schedule(delay, Pending::AutoAdvance { step: step_id.clone() });
            triggers.push(Trigger::TimedAdvance(task));
        }
        self.listeners.install(step_id.clone(), triggers);
    }

    fn revoke_listeners(&mut self) {
        for trigger in self.listeners.revoke() {
            if let Trigger::TimedAdvance(task) = trigger {
                self.scheduler.cancel(task);
            }
        }
    }

    fn persist(&mut self) {
        self.store.save(&PersistedState::from(&self.state));
    }

    fn capture(&self) -> HistorySnapshot {
        HistorySnapshot { state: self.state.clone(),
                          sequence: self.sequence.clone(),
                          fields: snapshot::capture(&self.surface) }
    }

    // ---------------------------------------------------------------------
    // Acciones
    // ---------------------------------------------------------------------

    /// Entrega una interacción. Devuelve `true` si inició una transición.
    pub fn dispatch(&mut self, action: UserAction) -> bool {
        match action {
            UserAction::Check(locator) => self.on_toggle(locator, true),
            UserAction::Uncheck(locator) => self.on_toggle(locator, false),
            UserAction::Input(locator, text) => self.on_input(locator, text),
            UserAction::Next => self.on_next(),
            UserAction::Back => self.go_back(),
            UserAction::Contact => self.on_contact_control(),
            UserAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Escribe un valor y notifica los campos que realmente cambiaron
    /// (incluidos los hermanos de un grupo de radios).
    fn write_field(&mut self, locator: &FieldLocator, value: FieldValue) -> bool {
        let mut watched = self.layout.radio_group(locator);
        if watched.is_empty() {
            watched.push(locator.clone());
        }
        let before: Vec<Option<FieldValue>> = watched.iter().map(|l| self.surface.value(l)).collect();
        if !self.surface.set_value(locator, value) {
            debug!("field {} is not present", locator);
            return false;
        }
        for (loc, prev) in watched.into_iter().zip(before) {
            let now = self.surface.value(&loc);
            if now != prev {
                if let Some(value) = now {
                    self.emit(PresentationEvent::FieldChanged { locator: loc, value });
                }
            }
        }
        true
    }

    fn on_toggle(&mut self, locator: FieldLocator, checked: bool) -> bool {
        let was_checked = self.surface.value(&locator).is_some_and(|v| v.is_checked());
        if !self.write_field(&locator, FieldValue::Toggle(checked)) || !checked {
            return false;
        }
        let Some((owner, spec)) = self.layout.field(&locator) else {
            return false;
        };
        if self.active.as_ref() != Some(owner) || self.phase.is_transitioning() {
            return false;
        }
        let gender = spec.gender_path;
        let is_toggle = spec.kind.is_toggle();

        if self.listeners.has(Trigger::GenderChoice) {
            return match gender {
                Some(path) => self.choose_gender(path),
                None => false,
            };
        }
        // Sólo un cambio real de desmarcado a marcado cuenta como respuesta.
        if self.listeners.has(Trigger::AutoAdvanceOnToggle) && is_toggle && !was_checked {
            return self.advance();
        }
        false
    }

    fn on_input(&mut self, locator: FieldLocator, text: String) -> bool {
        if !self.write_field(&locator, FieldValue::Text(text)) {
            return false;
        }
        if let Some(path) = self.layout.recommendation_path_for(&locator) {
            self.refresh_recommendation(path);
        }
        false
    }

    fn on_next(&mut self) -> bool {
        if self.phase.is_transitioning() {
            debug!("next ignored: transition in progress");
            return false;
        }
        let Some(step_id) = self.active.clone() else {
            return false;
        };
        match self.listeners.next_trigger() {
            Some(Trigger::OptionNext) => match self.checked_attr(&step_id, |f| f.option.clone()) {
                Some(option) => self.choose_option(&option),
                None => false,
            },
            Some(Trigger::BodyGoalNext) => match self.checked_attr(&step_id, |f| f.body_type.clone()) {
                Some(body_type) => self.choose_body_type(body_type),
                None => false,
            },
            Some(Trigger::GatedNext { require_toggle }) => {
                if !require_toggle || self.checked_attr(&step_id, |_| Some(())).is_some() {
                    self.advance()
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn on_contact_control(&mut self) -> bool {
        if self.phase.is_transitioning() || !self.listeners.has(Trigger::ContactControl) {
            return false;
        }
        self.go_contact()
    }

    /// Primer toggle marcado del paso del que `attr` extrae un valor.
    fn checked_attr<T, F>(&self, step_id: &StepId, attr: F) -> Option<T>
        where F: Fn(&FieldSpec) -> Option<T>
    {
        let spec = self.layout.step(step_id)?;
        spec.toggles()
            .filter(|f| self.surface.value(&f.locator()).is_some_and(|v| v.is_checked()))
            .find_map(attr)
    }

    fn choose_gender(&mut self, path: QuizPath) -> bool {
        let state = FlowState::for_path(path);
        let sequence = self.resolver().resolve(&state);
        self.show_step(FlowTarget { state, sequence }, true)
    }

    fn choose_option(&mut self, option: &str) -> bool {
        let Some(current) = self.active.clone() else {
            return false;
        };
        let filtered = self.resolver().filter_by_option(&self.sequence, option);
        let index = filtered.position(&current).map_or(0, |p| p + 1);
        if index >= filtered.len() {
            debug!("option '{}' leaves no step after {}", option, current);
            return false;
        }
        let state = self.state.at(index);
        self.show_step(FlowTarget { state, sequence: filtered }, true)
    }

    fn choose_body_type(&mut self, body_type: String) -> bool {
        let Some(path) = self.state.selected_path else {
            return false;
        };
        if self.layout.body_type_steps(path, &body_type).map_or(true, |s| s.is_empty()) {
            debug!("body type '{}' has no steps under {}", body_type, path);
            return false;
        }
        let state = FlowState { body_type: Some(body_type),
                                current_step: 0,
                                ..self.state.clone() };
        let sequence = self.resolver().resolve(&state);
        self.show_step(FlowTarget { state, sequence }, true)
    }

    fn advance(&mut self) -> bool {
        let next = self.state.current_step + 1;
        if next < self.sequence.len() {
            let target = FlowTarget { state: self.state.at(next),
                                      sequence: self.sequence.clone() };
            return self.show_step(target, true);
        }
        self.end_of_sequence()
    }

    /// Al agotar una sub-rama de tipo de cuerpo se deriva al contacto,
    /// salvo que el último paso tenga su propio botón de contacto (y no
    /// esté marcado `auto_contact`). Fuera de una sub-rama no hay efecto.
    fn end_of_sequence(&mut self) -> bool {
        let Some(spec) = self.active.as_ref().and_then(|id| self.layout.step(id)) else {
            return false;
        };
        let routes = !self.state.on_contact
                     && self.state.body_type.is_some()
                     && (spec.auto_contact || !spec.has_contact_control);
        if !routes {
            debug!("end of sequence at {}, staying", spec.id);
            return false;
        }
        self.go_contact()
    }

    fn go_contact(&mut self) -> bool {
        let state = FlowState { on_contact: true,
                                current_step: 0,
                                ..self.state.clone() };
        let sequence = self.resolver().resolve(&state);
        self.show_step(FlowTarget { state, sequence }, true)
    }

    /// Vuelve al estado anterior de la historia. Con la pila vacía vuelve
    /// al selector de género.
    pub fn go_back(&mut self) -> bool {
        if self.phase.is_transitioning() {
            debug!("back ignored: transition in progress");
            return false;
        }
        let Some(snap) = self.history.pop() else {
            let target = self.initial_target();
            return self.show_step(target, false);
        };
        let target_step = snap.sequence.get(snap.state.current_step).cloned();
        if !self.show_step(FlowTarget { state: snap.state,
                                        sequence: snap.sequence },
                           false)
        {
            return false;
        }

        let held: Vec<FieldLocator> = match target_step.as_ref().and_then(|id| self.layout.step(id)) {
            Some(spec) if spec.kind == StepKind::RadioAutoAdvance => spec.toggles().map(FieldSpec::locator).collect(),
            _ => Vec::new(),
        };
        let report = snapshot::restore(&mut self.surface, &self.layout, &snap.fields, |loc| held.contains(loc));
        let mut touched_paths = Vec::new();
        for (locator, value) in report.written {
            if let Some(path) = self.layout.recommendation_path_for(&locator) {
                if !touched_paths.contains(&path) {
                    touched_paths.push(path);
                }
            }
            self.emit(PresentationEvent::FieldChanged { locator, value });
        }
        for path in touched_paths {
            self.refresh_recommendation(path);
        }
        if let (false, Some(step)) = (held.is_empty(), target_step) {
            self.scheduler.after_render(Pending::ClearToggles { step,
                                                                stage: ClearStage::First });
        }
        true
    }

    /// Reinicio completo. Se aplica aunque haya una transición en curso.
    pub fn restart(&mut self) {
        self.scheduler.clear_all();
        self.revoke_listeners();
        self.phase = Phase::Idle;
        self.store.clear();
        self.history.clear();
        let FlowTarget { state, sequence } = self.initial_target();
        self.state = state;
        self.sequence = sequence;
        if let Some(outgoing) = self.active.take() {
            self.emit(PresentationEvent::StepDeactivated { step_id: outgoing });
        }
        self.show_section();
        match self.sequence.get(0).cloned() {
            Some(first) => self.activate(first),
            None => warn!("restart: gender selector has no steps"),
        }
    }

    fn refresh_recommendation(&mut self, path: QuizPath) {
        let Some(inputs) = self.layout.recommendation_inputs(path) else {
            return;
        };
        let read = |loc: &FieldLocator| {
            self.surface
                .value(loc)
                .and_then(|v| v.as_text().map(str::to_owned))
                .unwrap_or_default()
        };
        let category = recommend_text(&read(&inputs.current), &read(&inputs.goal));
        self.recommendations.insert(path, category);
        self.emit(PresentationEvent::RecommendationChanged { gender: path,
                                                             category });
    }

    // ---------------------------------------------------------------------
    // Tiempo
    // ---------------------------------------------------------------------

    /// Avanza el reloj virtual ejecutando las tareas que vencen.
    pub fn advance_time(&mut self, dt: Duration) {
        let until = self.scheduler.now() + dt;
        while let Some((task_id, task)) = self.scheduler.pop_due(until) {
            self.fire(task_id, task);
        }
        self.scheduler.set_now(until);
    }

    /// Ejecuta los callbacks de after-render encolados.
    pub fn render_frame(&mut self) {
        for (task_id, task) in self.scheduler.take_frame() {
            self.fire(task_id, task);
        }
    }

    /// Completa la transición en curso y los frames pendientes. No dispara
    /// avances temporizados de un paso ya activo.
    pub fn run_until_idle(&mut self) {
        loop {
            if self.scheduler.has_frames() {
                self.render_frame();
                continue;
            }
            if !self.phase.is_transitioning() {
                break;
            }
            match self.scheduler.next_deadline() {
                Some(at) => {
                    let dt = at.saturating_sub(self.scheduler.now());
                    self.advance_time(dt);
                }
                None => break,
            }
        }
    }

    fn fire(&mut self, task_id: TaskId, task: Pending) {
        match task {
            Pending::ExitStart { outgoing, incoming } => {
                self.emit(PresentationEvent::StepDeactivated { step_id: outgoing });
                self.active = None;
                self.phase = Phase::Transitioning(TransitionPhase::Exited);
                self.scheduler.schedule(self.timings.exit_duration, Pending::ExitFinish { incoming });
            }
            Pending::ExitFinish { incoming } => self.activate(incoming),
            Pending::AutoAdvance { step } => {
                let live = self.listeners.timed_task() == Some(task_id) && self.active.as_ref() == Some(&step);
                if self.phase.is_transitioning() || !live {
                    debug!("stale timed advance for {}", step);
                    return;
                }
                self.advance();
            }
            Pending::ClearToggles { step, stage: ClearStage::First } => {
                self.scheduler.after_render(Pending::ClearToggles { step,
                                                                    stage: ClearStage::Second });
            }
            Pending::ClearToggles { step, stage: ClearStage::Second } => self.clear_toggles(&step),
        }
    }

    fn clear_toggles(&mut self, step: &StepId) {
        if self.sequence.get(self.state.current_step) != Some(step) {
            return;
        }
        let toggles: Vec<FieldLocator> = self.layout
                                             .step(step)
                                             .map(|s| s.toggles().map(FieldSpec::locator).collect())
                                             .unwrap_or_default();
        for locator in toggles {
            if self.surface.value(&locator).is_some_and(|v| v.is_checked())
               && self.surface.set_value(&locator, FieldValue::Toggle(false))
            {
                self.emit(PresentationEvent::FieldChanged { locator,
                                                            value: FieldValue::Toggle(false) });
            }
        }
        self.emit(PresentationEvent::LayoutRequested { step_id: step.clone() });
    }

    // ---------------------------------------------------------------------
    // Accesores
    // ---------------------------------------------------------------------

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn sequence(&self) -> &StepSequence {
        &self.sequence
    }

    pub fn active_step(&self) -> Option<&StepId> {
        self.active.as_ref()
    }

    /// Paso al que apunta el estado (el activo o el que está entrando).
    pub fn current_step_id(&self) -> Option<&StepId> {
        self.sequence.get(self.state.current_step)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase.is_transitioning()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn journal(&self) -> &PresentationJournal {
        &self.journal
    }

    pub fn events(&self) -> Vec<PresentationEvent> {
        self.journal.events()
    }

    /// Variante compacta de los eventos emitidos.
    pub fn event_codes(&self) -> Vec<&'static str> {
        self.journal.codes()
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    /// Acceso directo a la superficie (cambios del host que no pasan por
    /// `dispatch`; no generan notificaciones).
    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn layout(&self) -> &QuizLayout {
        &self.layout
    }

    pub fn recommendation(&self, gender: QuizPath) -> Option<Recommendation> {
        self.recommendations.get(&gender).copied().flatten()
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }
}
