use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

/// Tuning for [`AxisPlan::plan`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepPlanTuning {
    /// Tick budget shared between the positive and negative half of the axis.
    pub target_tick_count: usize,
    /// Added to the span sum before dividing, and used as the positive span
    /// when the data range is empty.
    pub span_epsilon: f64,
}

impl Default for StepPlanTuning {
    fn default() -> Self {
        Self {
            target_tick_count: 10,
            span_epsilon: 0.01,
        }
    }
}

impl StepPlanTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if self.target_tick_count == 0 {
            return Err(ChartError::InvalidData(
                "target tick count must be > 0".to_owned(),
            ));
        }
        if !self.span_epsilon.is_finite() || self.span_epsilon <= 0.0 {
            return Err(ChartError::InvalidData(
                "span epsilon must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// One rendered value-axis tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub pixel: f64,
}

/// Vertical pixel band ticks must fall strictly inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickBand {
    pub top: f64,
    pub bottom: f64,
}

impl TickBand {
    #[must_use]
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    #[must_use]
    pub fn contains_strictly(self, pixel: f64) -> bool {
        pixel.is_finite() && self.top < pixel && pixel < self.bottom
    }
}

/// Value-axis grid: a nice step, a tick-aligned domain and the visible ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisPlan {
    pub step_size: f64,
    pub domain_min: f64,
    pub domain_max: f64,
    pub ticks: Vec<AxisTick>,
}

impl AxisPlan {
    /// Derives step and domain from the data extrema.
    ///
    /// The positive and negative halves of the range each get a share of the
    /// tick budget proportional to their size; each half snaps its raw step to
    /// 1, 2, 5 or 10 times a power of ten and the larger result wins, so both
    /// halves share one grid. Ticks are left empty until
    /// [`AxisPlan::with_ticks`] places them.
    pub fn plan(min_value: f64, max_value: f64, tuning: StepPlanTuning) -> ChartResult<Self> {
        let tuning = tuning.validate()?;
        if !min_value.is_finite() || !max_value.is_finite() {
            return Err(ChartError::InvalidData(
                "axis extrema must be finite".to_owned(),
            ));
        }
        let (min_value, max_value) = (min_value.min(max_value), min_value.max(max_value));

        let mut positive_span = max_value.max(0.0);
        let negative_span = (-min_value).max(0.0);
        if positive_span == 0.0 && negative_span == 0.0 {
            positive_span = tuning.span_epsilon;
        }

        let (positive_ticks, negative_ticks) =
            allocate_ticks(positive_span, negative_span, tuning);
        let positive_step = span_step(positive_span, positive_ticks);
        let negative_step = span_step(negative_span, negative_ticks);
        let step_size = match (positive_step, negative_step) {
            (Some(positive), Some(negative)) => positive.max(negative),
            (Some(step), None) | (None, Some(step)) => step,
            (None, None) => {
                return Err(ChartError::InvalidData(
                    "axis step could not be resolved".to_owned(),
                ));
            }
        };

        let first_index = (min_value / step_size).floor();
        let mut last_index = (max_value / step_size).ceil();
        if last_index <= first_index {
            last_index = first_index + 1.0;
        }

        trace!(
            min_value,
            max_value,
            positive_ticks,
            negative_ticks,
            step_size,
            "planned axis step"
        );

        Ok(Self {
            step_size,
            domain_min: first_index * step_size,
            domain_max: last_index * step_size,
            ticks: Vec::new(),
        })
    }

    /// Builds the value scale spanning this plan's domain.
    pub fn value_scale(&self, pixel_top: f64, pixel_bottom: f64) -> ChartResult<LinearScale> {
        LinearScale::new(self.domain_min, self.domain_max, pixel_top, pixel_bottom)
    }

    /// Every step multiple from `domain_min` to `domain_max`, inclusive.
    pub fn tick_values(&self) -> impl Iterator<Item = f64> + '_ {
        let step = self.step_size;
        let first = (self.domain_min / step).round() as i64;
        let last = (self.domain_max / step).round() as i64;
        (first..=last).map(move |index| index as f64 * step)
    }

    /// Places ticks through `scale`, keeping those strictly inside `band`.
    #[must_use]
    pub fn with_ticks(mut self, scale: LinearScale, band: TickBand) -> Self {
        self.ticks = self
            .tick_values()
            .filter_map(|value| {
                let pixel = scale.value_to_pixel(value).ok()?;
                band.contains_strictly(pixel)
                    .then_some(AxisTick { value, pixel })
            })
            .collect();
        self
    }
}

/// Splits the tick budget between the positive and negative span.
///
/// Each side gets at least one tick so neither division below can be by zero.
#[must_use]
pub fn allocate_ticks(
    positive_span: f64,
    negative_span: f64,
    tuning: StepPlanTuning,
) -> (usize, usize) {
    let target = tuning.target_tick_count.max(1);
    let ratio = positive_span / (positive_span + negative_span + tuning.span_epsilon);
    let share = ((ratio * target as f64).ceil() as usize).min(target);
    let negative = target.saturating_sub(share).max(1);
    (share.max(1), negative)
}

/// Snaps a raw step to 1, 2, 5 or 10 times its power of ten.
#[must_use]
pub fn nice_step(raw_step: f64) -> Option<f64> {
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return None;
    }

    let magnitude = 10_f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;
    let multiplier = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };
    Some(multiplier * magnitude)
}

fn span_step(span: f64, ticks: usize) -> Option<f64> {
    if span <= 0.0 || ticks == 0 {
        return None;
    }
    nice_step(span / ticks as f64)
}

#[cfg(test)]
mod tests {
    use super::{StepPlanTuning, allocate_ticks, nice_step};

    #[test]
    fn nice_step_uses_documented_thresholds() {
        assert_eq!(nice_step(1.49), Some(1.0));
        assert_eq!(nice_step(1.5), Some(2.0));
        assert_eq!(nice_step(2.99), Some(2.0));
        assert_eq!(nice_step(3.0), Some(5.0));
        assert_eq!(nice_step(7.49), Some(5.0));
        assert_eq!(nice_step(7.5), Some(10.0));
        assert_eq!(nice_step(0.0), None);
        assert_eq!(nice_step(f64::NAN), None);
    }

    #[test]
    fn allocation_keeps_one_tick_per_side() {
        let tuning = StepPlanTuning::default();
        assert_eq!(allocate_ticks(23.0, 7.0, tuning), (8, 2));
        assert_eq!(allocate_ticks(0.0, 50.0, tuning), (1, 10));
        assert_eq!(allocate_ticks(50.0, 0.0, tuning), (10, 1));
    }
}
