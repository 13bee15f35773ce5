//! Resaltado de opciones: refleja qué toggles están marcados para que las
//! tarjetas de opción y los radios simulados sigan al valor real.
use std::collections::BTreeSet;

use quiz_core::{FieldLocator, FieldValue, PresentationEvent, PresentationNotifier};

#[derive(Debug, Default, Clone)]
pub struct OptionHighlighter {
    highlighted: BTreeSet<FieldLocator>,
}

impl OptionHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_highlighted(&self, locator: &FieldLocator) -> bool {
        self.highlighted.contains(locator)
    }

    pub fn highlighted(&self) -> impl Iterator<Item = &FieldLocator> {
        self.highlighted.iter()
    }
}

impl PresentationNotifier for OptionHighlighter {
    fn notify(&mut self, event: &PresentationEvent) {
        if let PresentationEvent::FieldChanged { locator, value: FieldValue::Toggle(checked) } = event {
            if *checked {
                self.highlighted.insert(locator.clone());
            } else {
                self.highlighted.remove(locator);
            }
        }
    }
}
