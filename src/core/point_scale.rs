use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Ordinal category axis: evenly spaced points with half a slot of padding at
/// both ends, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointScale {
    count: usize,
    range_start: f64,
    range_end: f64,
}

impl PointScale {
    pub fn new(count: usize, range_start: f64, range_end: f64) -> ChartResult<Self> {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "category range must be finite".to_owned(),
            ));
        }
        if range_end < range_start {
            return Err(ChartError::InvalidData(
                "category range end must be >= start".to_owned(),
            ));
        }

        Ok(Self {
            count,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.count == 0
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Distance between neighbouring category centers (one slot).
    #[must_use]
    pub fn step(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.range_end - self.range_start) / self.count as f64
    }

    /// Center pixel of the category at `index`.
    #[must_use]
    pub fn position(self, index: usize) -> Option<f64> {
        if index >= self.count {
            return None;
        }
        Some(self.range_start + self.step() * (index as f64 + 0.5))
    }

    /// Center pixel of the first item whose label equals `category`.
    #[must_use]
    pub fn position_of<'a, I>(self, categories: I, category: &str) -> Option<f64>
    where
        I: IntoIterator<Item = &'a str>,
    {
        categories
            .into_iter()
            .take(self.count)
            .position(|candidate| candidate == category)
            .and_then(|index| self.position(index))
    }
}
