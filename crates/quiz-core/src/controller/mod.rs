//! Controlador de pasos: máquina de estados de navegación.

mod builder;
mod core;
mod listeners;
mod transition;

pub use builder::ControllerBuilder;
pub use self::core::{StepController, UserAction};
pub use listeners::{ListenerRegistry, Trigger};
pub use transition::{Phase, TransitionPhase, TransitionTimings};
