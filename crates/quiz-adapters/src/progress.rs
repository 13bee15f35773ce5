//! Barra de progreso global del quiz y sección visible.
use quiz_core::{PresentationEvent, PresentationNotifier, SectionId};

#[derive(Debug, Default, Clone)]
pub struct ProgressIndicator {
    percent: f64,
    section: Option<SectionId>,
}

impl ProgressIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(posición + 1) / total * 100`.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn section(&self) -> Option<SectionId> {
        self.section
    }
}

impl PresentationNotifier for ProgressIndicator {
    fn notify(&mut self, event: &PresentationEvent) {
        match event {
            PresentationEvent::ProgressChanged { position, total } => {
                self.percent = if *total == 0 {
                    0.0
                } else {
                    (*position as f64 + 1.0) / *total as f64 * 100.0
                };
            }
            PresentationEvent::SectionShown { section } => self.section = Some(*section),
            _ => {}
        }
    }
}
