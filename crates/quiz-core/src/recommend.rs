//! Motor de recomendación a partir del peso actual y el objetivo.
//!
//! Funciones puras: el controlador lee los campos de entrada de la rama y
//! entrega el resultado como `RecommendationChanged`.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Categoría recomendada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    /// El objetivo supera el valor actual.
    #[serde(rename = "skinny")]
    Gain,
    /// Pérdida relativa de al menos 10 %.
    Overweight,
    /// Pérdida relativa entre 1 % y 10 %.
    Soft,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Gain => "skinny",
            Recommendation::Overweight => "overweight",
            Recommendation::Soft => "soft",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const OVERWEIGHT_LOSS_PCT: f64 = 10.0;
pub const SOFT_LOSS_PCT: f64 = 1.0;

/// Extrae una magnitud de texto libre ("82 kg", "1.75m").
///
/// Se descarta todo lo que no sea dígito o punto y se toma el prefijo
/// numérico válido más largo; `NaN` si no queda ninguno.
pub fn parse_magnitude(raw: &str) -> f64 {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in cleaned.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        end = i + 1;
    }
    let prefix = &cleaned[..end];
    if !prefix.chars().any(|c| c.is_ascii_digit()) {
        return f64::NAN;
    }
    prefix.trim_end_matches('.').parse().unwrap_or(f64::NAN)
}

pub fn recommend(current: f64, goal: f64) -> Option<Recommendation> {
    if current.is_nan() || goal.is_nan() || current <= 0.0 {
        return None;
    }
    if goal > current {
        return Some(Recommendation::Gain);
    }
    let loss = (current - goal) / current * 100.0;
    if loss >= OVERWEIGHT_LOSS_PCT {
        Some(Recommendation::Overweight)
    } else if loss >= SOFT_LOSS_PCT {
        Some(Recommendation::Soft)
    } else {
        None
    }
}

pub fn recommend_text(current: &str, goal: &str) -> Option<Recommendation> {
    recommend(parse_magnitude(current), parse_magnitude(goal))
}
