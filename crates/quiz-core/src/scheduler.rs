//! Planificador con reloj virtual.
//!
//! El controlador no duerme ni lee el reloj del sistema: registra tareas con
//! un retardo y el host avanza el tiempo (`pop_due`) o pinta un frame
//! (`take_frame`). Cada tarea tiene un `TaskId` y cancelarla es idempotente.
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<(Duration, TaskId), T>,
    frames: Vec<(TaskId, T)>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self { now: Duration::ZERO,
               next_id: 0,
               timers: BTreeMap::new(),
               frames: Vec::new() }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fija el reloj; nunca retrocede.
    pub fn set_now(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskId {
        let id = self.next_id();
        self.timers.insert((self.now + delay, id), task);
        id
    }

    /// Encola un callback para el próximo frame.
    pub fn after_render(&mut self, task: T) -> TaskId {
        let id = self.next_id();
        self.frames.push((id, task));
        id
    }

    /// Devuelve `true` sólo si la tarea seguía pendiente.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if let Some(key) = self.timers.keys().find(|(_, tid)| *tid == id).copied() {
            self.timers.remove(&key);
            return true;
        }
        if let Some(pos) = self.frames.iter().position(|(tid, _)| *tid == id) {
            self.frames.remove(pos);
            return true;
        }
        false
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.timers.keys().any(|(_, tid)| *tid == id) || self.frames.iter().any(|(tid, _)| *tid == id)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.keys().next().map(|(at, _)| *at)
    }

    /// Extrae la tarea con vencimiento más temprano si vence antes de
    /// `until` (empates por orden de registro) y mueve el reloj hasta ella.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskId, T)> {
        let key = *self.timers.keys().next()?;
        if key.0 > until {
            return None;
        }
        let task = self.timers.remove(&key)?;
        self.set_now(key.0);
        Some((key.1, task))
    }

    /// Callbacks encolados antes de este frame. Los que se encolen mientras
    /// se ejecutan quedan para el siguiente.
    pub fn take_frame(&mut self) -> Vec<(TaskId, T)> {
        std::mem::take(&mut self.frames)
    }

    pub fn has_frames(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.timers.len() + self.frames.len()
    }

    pub fn clear_all(&mut self) {
        self.timers.clear();
        self.frames.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_in_deadline_order_and_moves_clock() {
        let mut s = Scheduler::new();
        s.schedule(ms(400), "late");
        s.schedule(ms(200), "early");
        s.schedule(ms(200), "early-2");
        assert_eq!(s.pop_due(ms(100)), None);
        assert_eq!(s.pop_due(ms(1000)).map(|(_, t)| t), Some("early"));
        assert_eq!(s.now(), ms(200));
        assert_eq!(s.pop_due(ms(1000)).map(|(_, t)| t), Some("early-2"));
        assert_eq!(s.pop_due(ms(1000)).map(|(_, t)| t), Some("late"));
        assert_eq!(s.now(), ms(400));
        assert!(s.pop_due(ms(1000)).is_none());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut s = Scheduler::new();
        let a = s.schedule(ms(10), 1);
        let f = s.after_render(2);
        assert!(s.is_pending(a));
        assert!(s.cancel(a));
        assert!(!s.cancel(a));
        assert!(s.cancel(f));
        assert!(!s.cancel(f));
        let done = s.schedule(ms(5), 3);
        s.pop_due(ms(5));
        assert!(!s.cancel(done));
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn frames_drain_only_what_was_queued() {
        let mut s = Scheduler::new();
        s.after_render('a');
        let frame = s.take_frame();
        s.after_render('b');
        assert_eq!(frame.len(), 1);
        assert!(s.has_frames());
    }
}
