use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, PointScale};
use crate::error::{ChartError, ChartResult};

/// Immutable inputs of one geometry pass: resolved scales plus the bar
/// settings that shape every item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutContext {
    pub category_scale: PointScale,
    pub value_scale: LinearScale,
    pub bar_width_px: f64,
    /// Horizontal gap kept between a connector end and the bar it touches.
    pub connector_inset_px: f64,
    /// Value the running cursor starts from (hidden opening increments).
    pub opening_total: f64,
}

impl LayoutContext {
    pub fn new(
        category_scale: PointScale,
        value_scale: LinearScale,
        bar_width_px: f64,
    ) -> ChartResult<Self> {
        if !bar_width_px.is_finite() || bar_width_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "bar width must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self {
            category_scale,
            value_scale,
            bar_width_px,
            connector_inset_px: 0.0,
            opening_total: 0.0,
        })
    }

    #[must_use]
    pub fn with_connector_inset(mut self, inset_px: f64) -> Self {
        self.connector_inset_px = if inset_px.is_finite() {
            inset_px.max(0.0)
        } else {
            0.0
        };
        self
    }

    #[must_use]
    pub fn with_opening_total(mut self, opening_total: f64) -> Self {
        self.opening_total = if opening_total.is_finite() {
            opening_total
        } else {
            0.0
        };
        self
    }

    /// Pixel row of the value zero.
    #[must_use]
    pub fn zero_pixel(&self) -> f64 {
        self.value_scale.value_to_pixel_clamped(0.0)
    }

    /// Bar width actually drawn: the configured width, capped at one
    /// category slot so neighbours never overlap.
    #[must_use]
    pub fn effective_bar_width(&self) -> f64 {
        let slot = self.category_scale.step();
        if slot > 0.0 {
            self.bar_width_px.min(slot)
        } else {
            self.bar_width_px
        }
    }
}
