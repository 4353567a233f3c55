use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Affine value-axis mapping onto an inverted pixel range.
///
/// `domain_max` lands on `pixel_top`, `domain_min` on `pixel_bottom`, so larger
/// values sit higher on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    pixel_top: f64,
    pixel_bottom: f64,
}

impl LinearScale {
    pub fn new(
        domain_min: f64,
        domain_max: f64,
        pixel_top: f64,
        pixel_bottom: f64,
    ) -> ChartResult<Self> {
        if !domain_min.is_finite() || !domain_max.is_finite() || domain_min == domain_max {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_top.is_finite() || !pixel_bottom.is_finite() || pixel_top == pixel_bottom {
            return Err(ChartError::InvalidData(
                "scale pixel range must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_min,
            domain_max,
            pixel_top,
            pixel_bottom,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    /// `(top, bottom)` pixel range.
    #[must_use]
    pub fn pixel_range(self) -> (f64, f64) {
        (self.pixel_top, self.pixel_bottom)
    }

    pub fn value_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        Ok(self.map_unchecked(value))
    }

    pub fn pixel_to_value(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - self.pixel_bottom) / (self.pixel_top - self.pixel_bottom);
        Ok(self.domain_min + normalized * (self.domain_max - self.domain_min))
    }

    /// Maps a value and forces the result into the pixel range.
    ///
    /// Non-finite input maps to the zero pixel (itself clamped), so a
    /// degenerate value can never leak NaN into geometry.
    #[must_use]
    pub fn value_to_pixel_clamped(self, value: f64) -> f64 {
        let (low, high) = self.pixel_bounds();
        let pixel = if value.is_finite() {
            self.map_unchecked(value)
        } else {
            self.map_unchecked(0.0)
        };
        if pixel.is_finite() {
            pixel.clamp(low, high)
        } else {
            low
        }
    }

    /// `(min, max)` of the pixel range regardless of orientation.
    #[must_use]
    pub fn pixel_bounds(self) -> (f64, f64) {
        (
            self.pixel_top.min(self.pixel_bottom),
            self.pixel_top.max(self.pixel_bottom),
        )
    }

    fn map_unchecked(self, value: f64) -> f64 {
        let normalized = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.pixel_bottom + normalized * (self.pixel_top - self.pixel_bottom)
    }
}
