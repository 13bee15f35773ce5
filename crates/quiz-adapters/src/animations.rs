//! Barras de progreso y rellenos líquidos ligados a pasos.
//!
//! Al activarse un paso se reinician sus animaciones desde `start` (o 0)
//! hasta `fill`; al desactivarse se detienen y, 300 ms después, vuelven a
//! 0 %. Una reactivación dentro de ese margen cancela el reinicio.
use std::collections::HashMap;
use std::time::Duration;

use log::debug;
use quiz_core::{PresentationEvent, PresentationNotifier, Scheduler, StepId, TaskId};
use serde::Serialize;

use crate::Animated;

pub const RESET_DELAY_MS: u64 = 300;
pub const DEFAULT_FILL_DURATION_MS: u64 = 2000;
const MIN_FILL_DURATION_MS: u64 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FillKind {
    Bar,
    Liquid,
}

impl FillKind {
    /// Vida del texto emergente "+N%".
    fn popup_lifetime(&self) -> Duration {
        match self {
            FillKind::Bar => Duration::from_millis(1800),
            FillKind::Liquid => Duration::from_millis(2200),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillSpec {
    pub id: String,
    pub step: StepId,
    pub kind: FillKind,
    /// Porcentaje objetivo.
    pub fill: f64,
    /// Porcentaje inicial; si existe se muestra la diferencia.
    pub start: Option<f64>,
    pub duration: Duration,
}

impl FillSpec {
    pub fn bar(id: impl Into<String>, step: impl Into<StepId>, fill: f64) -> Self {
        Self { id: id.into(),
               step: step.into(),
               kind: FillKind::Bar,
               fill,
               start: None,
               duration: Duration::from_millis(DEFAULT_FILL_DURATION_MS) }
    }

    pub fn liquid(id: impl Into<String>, step: impl Into<StepId>, fill: f64) -> Self {
        Self { kind: FillKind::Liquid,
               ..Self::bar(id, step, fill) }
    }

    pub fn with_start(mut self, start: f64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration.max(Duration::from_millis(MIN_FILL_DURATION_MS));
        self
    }
}

fn clamp_pct(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 100.0)
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Color de la barra según el porcentaje (rojo → amarillo → verde).
pub fn color_for(pct: f64) -> String {
    if pct <= 40.0 {
        "#a20000".to_string()
    } else if pct <= 65.0 {
        let ratio = (pct - 40.0) / 25.0;
        let r = 162.0 + (255.0 - 162.0) * ratio;
        let g = 255.0 * ratio;
        format!("rgb({}, {}, 0)", r.round() as u8, g.round() as u8)
    } else {
        let ratio = (pct - 65.0) / 35.0;
        let r = 255.0 - 255.0 * ratio;
        let g = 255.0 - (255.0 - 128.0) * ratio;
        format!("rgb({}, {}, 0)", r.round() as u8, g.round() as u8)
    }
}

#[derive(Debug, Clone, Copy)]
struct Run {
    from: f64,
    to: f64,
    started: Duration,
    duration: Duration,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FillState {
    pub width: f64,
    pub completions: u32,
    pub popups: Vec<String>,
    #[serde(skip)]
    run: Option<Run>,
    #[serde(skip)]
    reset_task: Option<TaskId>,
}

impl FillState {
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn label(&self) -> String {
        format!("{}%", self.width.round() as i64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FillTask {
    Reset(String),
    PopupExpire(String),
}

#[derive(Debug, Default)]
pub struct StepAnimations {
    specs: Vec<FillSpec>,
    states: HashMap<String, FillState>,
    scheduler: Scheduler<FillTask>,
}

impl StepAnimations {
    pub fn new(specs: Vec<FillSpec>) -> Self {
        let states = specs.iter().map(|s| (s.id.clone(), FillState::default())).collect();
        Self { specs,
               states,
               scheduler: Scheduler::new() }
    }

    pub fn state(&self, id: &str) -> Option<&FillState> {
        self.states.get(id)
    }

    pub fn width(&self, id: &str) -> f64 {
        self.states.get(id).map_or(0.0, |s| s.width)
    }

    fn fills_of(&self, step: &StepId) -> Vec<FillSpec> {
        self.specs.iter().filter(|s| &s.step == step).cloned().collect()
    }

    fn start(&mut self, spec: &FillSpec) {
        let now = self.scheduler.now();
        let Some(state) = self.states.get_mut(&spec.id) else {
            return;
        };
        if let Some(task) = state.reset_task.take() {
            self.scheduler.cancel(task);
        }
        let from = clamp_pct(spec.start.unwrap_or(0.0));
        let to = clamp_pct(spec.fill);
        state.width = from;
        state.run = Some(Run { from,
                               to,
                               started: now,
                               duration: spec.duration });
        if spec.start.is_some() {
            let diff = (to - from).round() as i64;
            if diff != 0 {
                state.popups.push(format!("{}{}%", if diff > 0 { "+" } else { "" }, diff));
                self.scheduler.schedule(spec.kind.popup_lifetime(), FillTask::PopupExpire(spec.id.clone()));
            }
        }
    }

    fn stop(&mut self, spec: &FillSpec) {
        let Some(state) = self.states.get_mut(&spec.id) else {
            return;
        };
        state.run = None;
        if let Some(task) = state.reset_task.take() {
            self.scheduler.cancel(task);
        }
        let task = self.scheduler.schedule(Duration::from_millis(RESET_DELAY_MS), FillTask::Reset(spec.id.clone()));
        state.reset_task = Some(task);
    }

    /// Detiene una animación en curso. Devuelve `false` si ya no corría.
    pub fn cancel(&mut self, id: &str) -> bool {
        self.states.get_mut(id).is_some_and(|s| s.run.take().is_some())
    }

    fn tick(&mut self) {
        let now = self.scheduler.now();
        for state in self.states.values_mut() {
            let Some(run) = state.run else { continue };
            let elapsed = now.saturating_sub(run.started).as_secs_f64();
            let progress = (elapsed / run.duration.as_secs_f64()).min(1.0);
            state.width = run.from + (run.to - run.from) * ease_out_cubic(progress);
            if progress >= 1.0 {
                state.run = None;
                state.completions += 1;
            }
        }
    }

    fn fire(&mut self, task: FillTask) {
        match task {
            FillTask::Reset(id) => {
                if let Some(state) = self.states.get_mut(&id) {
                    state.reset_task = None;
                    state.width = 0.0;
                    debug!("fill {} reset", id);
                }
            }
            FillTask::PopupExpire(id) => {
                if let Some(state) = self.states.get_mut(&id) {
                    if !state.popups.is_empty() {
                        state.popups.remove(0);
                    }
                }
            }
        }
    }

    /// Estado serializable de todos los rellenos (orden de declaración).
    pub fn snapshot(&self) -> serde_json::Value {
        let entries: Vec<serde_json::Value> =
            self.specs
                .iter()
                .filter_map(|spec| {
                    self.states.get(&spec.id).map(|st| {
                                                  serde_json::json!({
                                                      "id": spec.id,
                                                      "kind": spec.kind,
                                                      "label": st.label(),
                                                      "color": color_for(st.width),
                                                      "running": st.is_running(),
                                                  })
                                              })
                })
                .collect();
        serde_json::Value::Array(entries)
    }
}

impl PresentationNotifier for StepAnimations {
    fn notify(&mut self, event: &PresentationEvent) {
        match event {
            PresentationEvent::StepActivated { step_id } => {
                for spec in self.fills_of(step_id) {
                    self.start(&spec);
                }
            }
            PresentationEvent::StepDeactivated { step_id } => {
                for spec in self.fills_of(step_id) {
                    self.stop(&spec);
                }
            }
            _ => {}
        }
    }
}

impl Animated for StepAnimations {
    fn advance(&mut self, dt: Duration) {
        let until = self.scheduler.now() + dt;
        while let Some((_, task)) = self.scheduler.pop_due(until) {
            self.tick();
            self.fire(task);
        }
        self.scheduler.set_now(until);
        self.tick();
    }

    fn cancel_all(&mut self) {
        self.scheduler.clear_all();
        for state in self.states.values_mut() {
            state.run = None;
            state.reset_task = None;
        }
    }
}
