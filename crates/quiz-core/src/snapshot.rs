//! Captura y restauración de los valores de los campos.
use log::debug;

use crate::layout::QuizLayout;
use crate::model::{FieldLocator, FieldSnapshot, FieldValue};
use crate::surface::InputSurface;

/// Resultado de una restauración: qué se escribió y qué se omitió.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub written: Vec<(FieldLocator, FieldValue)>,
    pub held_back: Vec<FieldLocator>,
    pub missing: Vec<FieldLocator>,
    pub unchanged_ranges: usize,
}

/// Registra el valor de todos los campos presentes en la superficie.
pub fn capture<D: InputSurface + ?Sized>(surface: &D) -> FieldSnapshot {
    surface.locators()
           .into_iter()
           .filter_map(|loc| surface.value(&loc).map(|v| (loc, v)))
           .collect()
}

/// Escribe de vuelta un snapshot.
///
/// - los localizadores que ya no resuelven se omiten;
/// - los sliders cuyo valor ya coincide no se tocan;
/// - `hold_back` permite reservar campos que el llamador limpiará después.
pub fn restore<D, F>(surface: &mut D, layout: &QuizLayout, snapshot: &FieldSnapshot, hold_back: F) -> RestoreReport
    where D: InputSurface + ?Sized,
          F: Fn(&FieldLocator) -> bool
{
    let mut report = RestoreReport::default();
    for (loc, value) in snapshot.iter() {
        if hold_back(loc) {
            report.held_back.push(loc.clone());
            continue;
        }
        let Some(current) = surface.value(loc) else {
            debug!("restore: locator {} no longer resolves", loc);
            report.missing.push(loc.clone());
            continue;
        };
        let is_range = layout.field(loc).is_some_and(|(_, spec)| spec.is_range());
        if is_range && &current == value {
            report.unchanged_ranges += 1;
            continue;
        }
        if surface.set_value(loc, value.clone()) {
            report.written.push((loc.clone(), value.clone()));
        }
    }
    report
}
