use serde::{Deserialize, Serialize};

use crate::core::PointKind;
use crate::render::Color;

/// Largest share of white mixed into the smallest increment when gradient
/// coloring is enabled.
pub const GRADIENT_MAX_LIGHTEN: f64 = 0.6;

/// Resolved bar colors by role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarPalette {
    pub positive: Color,
    pub negative: Color,
    pub total: Color,
    /// Used for values whose sign cannot be determined.
    pub fallback: Color,
    pub gradient_enabled: bool,
}

impl Default for BarPalette {
    fn default() -> Self {
        Self {
            positive: Color::rgb(0.0, 120.0 / 255.0, 46.0 / 255.0),
            negative: Color::rgb(177.0 / 255.0, 6.0 / 255.0, 6.0 / 255.0),
            total: Color::rgb(0.0, 51.0 / 255.0, 57.0 / 255.0),
            fallback: Color::rgb(0.6, 0.6, 0.6),
            gradient_enabled: false,
        }
    }
}

impl BarPalette {
    /// Picks the color of one point.
    ///
    /// `max_increment_magnitude` is the largest absolute increment value of the
    /// dataset; it only matters when gradient coloring is enabled.
    #[must_use]
    pub fn resolve(&self, kind: PointKind, value: f64, max_increment_magnitude: f64) -> Color {
        if kind.is_total() {
            return self.total;
        }
        if !value.is_finite() {
            return self.fallback;
        }

        let base = if value < 0.0 {
            self.negative
        } else {
            self.positive
        };
        if !self.gradient_enabled {
            return base;
        }

        match gradient_weight(value.abs(), max_increment_magnitude) {
            Some(weight) => base.lighten((1.0 - weight) * GRADIENT_MAX_LIGHTEN),
            None => base,
        }
    }
}

fn gradient_weight(magnitude: f64, max_magnitude: f64) -> Option<f64> {
    if !max_magnitude.is_finite() || max_magnitude <= 0.0 {
        return None;
    }
    Some((magnitude / max_magnitude).clamp(0.0, 1.0))
}
