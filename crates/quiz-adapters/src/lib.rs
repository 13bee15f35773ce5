//! quiz-adapters: colaboradores de presentación.
//!
//! Cada colaborador implementa `PresentationNotifier` y mantiene su propio
//! estado visual; los que animan algo llevan un `Scheduler` propio y avanzan
//! con `Animated::advance`. El core sólo conoce los eventos.
//!
//! - `animations`: barras de progreso y rellenos líquidos por paso.
//! - `confetti`: ráfagas de confeti.
//! - `badges`: insignia de recomendación por género.
//! - `progress`: indicador de progreso global y sección visible.
//! - `highlight`: resaltado de opciones marcadas.

pub mod animations;
pub mod badges;
pub mod confetti;
pub mod highlight;
pub mod progress;

use std::time::Duration;

pub use animations::{FillKind, FillSpec, StepAnimations};
pub use badges::RecommendationBadges;
pub use confetti::{Burst, BurstSide, ConfettiLauncher};
pub use highlight::OptionHighlighter;
pub use progress::ProgressIndicator;

/// Colaborador con animaciones propias sobre un reloj virtual.
pub trait Animated {
    fn advance(&mut self, dt: Duration);
    /// Cancela todo lo pendiente. Repetirlo no tiene efecto.
    fn cancel_all(&mut self);
}
