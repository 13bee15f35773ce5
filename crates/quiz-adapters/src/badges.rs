//! Insignia de recomendación visible por género.
use std::collections::HashMap;

use quiz_core::{PresentationEvent, PresentationNotifier, QuizPath, Recommendation};

#[derive(Debug, Default, Clone)]
pub struct RecommendationBadges {
    shown: HashMap<QuizPath, Option<Recommendation>>,
    updates: usize,
}

impl RecommendationBadges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insignia visible para un género (`None`: todas ocultas).
    pub fn shown(&self, gender: QuizPath) -> Option<Recommendation> {
        self.shown.get(&gender).copied().flatten()
    }

    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl PresentationNotifier for RecommendationBadges {
    fn notify(&mut self, event: &PresentationEvent) {
        if let PresentationEvent::RecommendationChanged { gender, category } = event {
            self.shown.insert(*gender, *category);
            self.updates += 1;
        }
    }
}
