use serde::{Deserialize, Serialize};

use crate::core::{BarDirection, DataPoint, LayoutContext, PointKind};
use crate::render::Color;

/// Pixel geometry of one waterfall bar, index-aligned with the dataset items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub kind: PointKind,
    pub x_center: f64,
    pub x_left: f64,
    pub width: f64,
    pub y_top: f64,
    pub height: f64,
    pub direction: BarDirection,
    pub color: Color,
}

impl BarGeometry {
    #[must_use]
    pub fn x_right(&self) -> f64 {
        self.x_left + self.width
    }

    #[must_use]
    pub fn y_bottom(&self) -> f64 {
        self.y_top + self.height
    }

    /// Pixel row of the cumulative position this bar ends on.
    #[must_use]
    pub fn terminal_y(&self) -> f64 {
        match self.direction {
            BarDirection::Up => self.y_top,
            BarDirection::Down => self.y_bottom(),
        }
    }

    /// Pixel row the bar grows from.
    #[must_use]
    pub fn baseline_y(&self) -> f64 {
        match self.direction {
            BarDirection::Up => self.y_bottom(),
            BarDirection::Down => self.y_top,
        }
    }
}

/// Horizontal line joining the terminal edge of one bar to the next bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub from_index: usize,
    pub x_start: f64,
    pub x_end: f64,
    pub y: f64,
}

/// Lays out every item in one forward fold.
///
/// The fold state is the cursor: the pixel row of the running cumulative sum.
/// Increments stack from the cursor and move it; subtotal and grand-total bars
/// are drawn from zero and leave it alone, unless they open the sequence, in
/// which case the cursor jumps to their value so following increments stack
/// from it.
#[must_use]
pub fn layout_bars(items: &[DataPoint], ctx: &LayoutContext) -> Vec<BarGeometry> {
    let zero = ctx.zero_pixel();
    let initial_cursor = ctx.value_scale.value_to_pixel_clamped(ctx.opening_total);

    let (_, bars) = items.iter().enumerate().fold(
        (initial_cursor, Vec::with_capacity(items.len())),
        |(cursor, mut bars), (index, point)| {
            let (bar, next_cursor) = place_bar(index, point, cursor, zero, ctx);
            bars.push(bar);
            (next_cursor, bars)
        },
    );
    bars
}

fn place_bar(
    index: usize,
    point: &DataPoint,
    cursor: f64,
    zero: f64,
    ctx: &LayoutContext,
) -> (BarGeometry, f64) {
    let (low, high) = ctx.value_scale.pixel_bounds();
    let value_px = ctx.value_scale.value_to_pixel_clamped(point.value);
    let height = (zero - value_px).abs();
    let direction = BarDirection::from_value(point.value);

    let (y_top, next_cursor) = if point.kind.is_total() {
        let y_top = match direction {
            BarDirection::Down => zero,
            BarDirection::Up => value_px,
        };
        let next_cursor = if index == 0 { value_px } else { cursor };
        (y_top, next_cursor)
    } else {
        match direction {
            BarDirection::Down => (cursor, cursor + height),
            BarDirection::Up => (cursor - height, cursor - height),
        }
    };

    let y_bottom = (y_top + height).clamp(low, high);
    let y_top = y_top.clamp(low, high);
    let height = (y_bottom - y_top).max(0.0);
    let width = ctx.effective_bar_width();
    let x_center = ctx
        .category_scale
        .position(index)
        .unwrap_or(ctx.category_scale.range().0);

    let bar = BarGeometry {
        kind: point.kind,
        x_center,
        x_left: x_center - width * 0.5,
        width,
        y_top,
        height,
        direction,
        color: point.color,
    };
    (bar, next_cursor.clamp(low, high))
}

/// Routes one connector per consecutive bar pair; the last bar has none.
#[must_use]
pub fn route_connectors(bars: &[BarGeometry], inset_px: f64) -> Vec<Connector> {
    let inset = if inset_px.is_finite() {
        inset_px.max(0.0)
    } else {
        0.0
    };

    bars.windows(2)
        .enumerate()
        .map(|(from_index, pair)| {
            let x_start = pair[0].x_right() + inset;
            let x_end = (pair[1].x_left - inset).max(x_start);
            Connector {
                from_index,
                x_start,
                x_end,
                y: pair[0].terminal_y(),
            }
        })
        .collect()
}
