//! Ráfagas de confeti: dos ráfagas (izquierda y derecha) cada 250 ms
//! durante 2 s, con menos partículas a medida que se agota el tiempo.
use std::time::Duration;

use quiz_core::{PresentationEvent, PresentationNotifier, Scheduler};
use serde::Serialize;

use crate::Animated;

pub const CONFETTI_DURATION_MS: u64 = 2000;
pub const BURST_INTERVAL_MS: u64 = 250;
pub const MAX_PARTICLES: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BurstSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Burst {
    pub at_ms: u128,
    pub side: BurstSide,
    pub particles: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tick {
    ends_at: Duration,
}

#[derive(Debug, Default)]
pub struct ConfettiLauncher {
    scheduler: Scheduler<Tick>,
    bursts: Vec<Burst>,
    launches: usize,
}

impl ConfettiLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn launch(&mut self) {
        let ends_at = self.scheduler.now() + Duration::from_millis(CONFETTI_DURATION_MS);
        self.scheduler.schedule(Duration::from_millis(BURST_INTERVAL_MS), Tick { ends_at });
        self.launches += 1;
    }

    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    pub fn launches(&self) -> usize {
        self.launches
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.pending() > 0
    }

    fn fire(&mut self, tick: Tick) {
        let now = self.scheduler.now();
        let left = tick.ends_at.saturating_sub(now);
        if left.is_zero() {
            return;
        }
        let particles = MAX_PARTICLES * (left.as_secs_f64() / Duration::from_millis(CONFETTI_DURATION_MS).as_secs_f64());
        for side in [BurstSide::Left, BurstSide::Right] {
            self.bursts.push(Burst { at_ms: now.as_millis(),
                                     side,
                                     particles });
        }
        self.scheduler.schedule(Duration::from_millis(BURST_INTERVAL_MS), tick);
    }
}

impl PresentationNotifier for ConfettiLauncher {
    fn notify(&mut self, event: &PresentationEvent) {
        if matches!(event, PresentationEvent::ConfettiRequested) {
            self.launch();
        }
    }
}

impl Animated for ConfettiLauncher {
    fn advance(&mut self, dt: Duration) {
        let until = self.scheduler.now() + dt;
        while let Some((_, tick)) = self.scheduler.pop_due(until) {
            self.fire(tick);
        }
        self.scheduler.set_now(until);
    }

    fn cancel_all(&mut self) {
        self.scheduler.clear_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bursts_shrink_and_stop_after_two_seconds() {
        let mut confetti = ConfettiLauncher::new();
        confetti.notify(&PresentationEvent::ConfettiRequested);
        confetti.advance(Duration::from_millis(5000));
        let bursts = confetti.bursts();
        assert_eq!(bursts.len(), 14);
        assert_eq!(bursts[0].at_ms, 250);
        assert_eq!(bursts[0].particles, 43.75);
        assert_eq!(bursts[13].at_ms, 1750);
        assert_eq!(bursts[13].particles, 6.25);
        assert!(!confetti.is_running());
    }

    #[test]
    fn cancel_stops_pending_bursts() {
        let mut confetti = ConfettiLauncher::new();
        confetti.launch();
        confetti.advance(Duration::from_millis(600));
        assert_eq!(confetti.bursts().len(), 4);
        confetti.cancel_all();
        confetti.cancel_all();
        confetti.advance(Duration::from_millis(5000));
        assert_eq!(confetti.bursts().len(), 4);
    }
}
