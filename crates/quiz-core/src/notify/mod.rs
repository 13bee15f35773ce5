//! Notificaciones de presentación y su registro.

mod events;
mod journal;

use std::cell::RefCell;
use std::rc::Rc;

pub use events::PresentationEvent;
pub use journal::{JournalEntry, PresentationJournal};

/// Colaborador que reacciona a los eventos del controlador.
///
/// Las implementaciones no devuelven errores: un fallo visual nunca debe
/// alterar la navegación.
pub trait PresentationNotifier {
    fn notify(&mut self, event: &PresentationEvent);
}

/// Permite que el host conserve un handle al colaborador mientras el
/// controlador lo usa.
impl<T: PresentationNotifier + ?Sized> PresentationNotifier for Rc<RefCell<T>> {
    fn notify(&mut self, event: &PresentationEvent) {
        self.borrow_mut().notify(event)
    }
}

/// Colaborador que sólo acumula eventos (útil en tests).
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub events: Vec<PresentationEvent>,
}

impl PresentationNotifier for RecordingNotifier {
    fn notify(&mut self, event: &PresentationEvent) {
        self.events.push(event.clone());
    }
}
