use serde::{Deserialize, Serialize};

use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Role of one item in the waterfall sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointKind {
    /// Contributes its signed value to the running cumulative sum.
    Increment,
    /// Displays the accumulated value of one group, anchored at zero.
    Subtotal,
    /// Displays the accumulated value of every group, anchored at zero.
    GrandTotal,
}

impl PointKind {
    /// Whether bars of this kind are drawn from zero instead of the cursor.
    #[must_use]
    pub fn is_total(self) -> bool {
        matches!(self, Self::Subtotal | Self::GrandTotal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub category: String,
    pub value: f64,
    pub kind: PointKind,
    pub color: Color,
}

impl DataPoint {
    #[must_use]
    pub fn new(category: impl Into<String>, value: f64, kind: PointKind, color: Color) -> Self {
        Self {
            category: category.into(),
            value,
            kind,
            color,
        }
    }

    #[must_use]
    pub fn increment(category: impl Into<String>, value: f64, color: Color) -> Self {
        Self::new(category, value, PointKind::Increment, color)
    }

    #[must_use]
    pub fn subtotal(category: impl Into<String>, value: f64, color: Color) -> Self {
        Self::new(category, value, PointKind::Subtotal, color)
    }
}

/// Growth direction of a bar along the value axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarDirection {
    /// Toward larger values (up on screen).
    Up,
    /// Toward smaller values (down on screen).
    Down,
}

impl BarDirection {
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        if value < 0.0 { Self::Down } else { Self::Up }
    }
}
