use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    AxisPlan, BarGeometry, CachedTextMeasurer, ChartDataset, Connector, LayoutContext, PointScale,
    TextMeasurer, TickBand, WrappedLabel, layout_bars, max_label_lines, route_connectors,
    wrap_label,
};
use crate::error::{ChartError, ChartResult};

use super::{FormatContext, ValueFormatter, WaterfallConfig, WaterfallStyle};

/// Gap between the widest tick label and the plot area.
pub const AXIS_LABEL_GAP_PX: f64 = 6.0;
/// Space above and below the wrapped category labels.
pub const CATEGORY_LABEL_PADDING_PX: f64 = 4.0;
/// Space kept above a data label.
pub const DATA_LABEL_GAP_PX: f64 = 3.0;

/// Pixel rectangle the bars live in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    /// Top edge of the category label band; the value axis ends here.
    pub baseline: f64,
}

impl PlotArea {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.baseline - self.top
    }
}

/// Complete geometry of one update cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallLayout {
    pub dataset: ChartDataset,
    pub axis: AxisPlan,
    pub context: LayoutContext,
    pub plot_area: PlotArea,
    pub bars: Vec<BarGeometry>,
    pub connectors: Vec<Connector>,
    pub labels: Vec<WrappedLabel>,
    pub label_line_count: usize,
}

/// Format context for value labels of `dataset` on `axis`.
#[must_use]
pub fn format_context<'a>(
    style: &WaterfallStyle,
    dataset: &'a ChartDataset,
    axis: &AxisPlan,
) -> FormatContext<'a> {
    FormatContext {
        format_string: &dataset.format_string,
        display_unit: style.display_unit,
        decimals: style.decimals,
        magnitude_hint: Some(axis.domain_min.abs().max(axis.domain_max.abs())),
    }
}

/// Runs the full layout pipeline for one dataset.
///
/// Category labels are wrapped before the value scale exists: their line
/// count decides how tall the label band is, which fixes the baseline the
/// value axis maps onto.
pub fn compute_layout<M, F>(
    dataset: ChartDataset,
    config: &WaterfallConfig,
    measurer: &M,
    formatter: &F,
) -> ChartResult<WaterfallLayout>
where
    M: TextMeasurer + ?Sized,
    F: ValueFormatter + ?Sized,
{
    let viewport = config.viewport;
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let style = &config.style;
    let measurer = CachedTextMeasurer::new(measurer);
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    let label_font = style.label_font();

    let axis = AxisPlan::plan(dataset.min_value, dataset.max_value, config.axis_tuning)?;

    let axis_label_width = if style.show_axis && !dataset.is_empty() {
        let ctx = format_context(style, &dataset, &axis);
        axis.tick_values()
            .map(|value| measurer.measure(&formatter.format(value, &ctx), &label_font))
            .fold(0.0_f64, f64::max)
            + AXIS_LABEL_GAP_PX
    } else {
        0.0
    };

    let left = axis_label_width.min(width - 1.0).max(0.0);
    let right = (width - style.font_size * 0.5).max(left + 1.0);
    let category_scale = PointScale::new(dataset.len(), left, right)?;

    let column_width = if dataset.is_empty() {
        right - left
    } else {
        (right - left) / dataset.len() as f64
    };
    let labels: Vec<WrappedLabel> = dataset
        .items
        .iter()
        .map(|item| wrap_label(&item.category, column_width, &label_font, &measurer))
        .collect();
    let label_line_count = max_label_lines(&labels);

    let label_band =
        label_line_count as f64 * label_font.line_height_px() + 2.0 * CATEGORY_LABEL_PADDING_PX;
    let data_label_room = if style.data_label {
        style.data_label_font().line_height_px() + DATA_LABEL_GAP_PX
    } else {
        0.0
    };
    let top = (style.font_size + data_label_room).min(height - 1.0);
    let baseline = (height - label_band).max(top + 1.0);

    let value_scale = axis.value_scale(top, baseline)?;
    let axis = axis.with_ticks(value_scale, TickBand::new(top, baseline));

    let context = LayoutContext::new(category_scale, value_scale, style.bar_width)?
        .with_connector_inset(style.connector_inset)
        .with_opening_total(dataset.opening_total);
    let bars = layout_bars(&dataset.items, &context);
    let connectors = route_connectors(&bars, context.connector_inset_px);

    let (cache_hits, cache_misses) = measurer.stats();
    trace!(cache_hits, cache_misses, "text measurement cache");
    debug!(
        items = dataset.len(),
        step_size = axis.step_size,
        domain_min = axis.domain_min,
        domain_max = axis.domain_max,
        ticks = axis.ticks.len(),
        label_line_count,
        baseline,
        "computed waterfall layout"
    );

    Ok(WaterfallLayout {
        dataset,
        axis,
        context,
        plot_area: PlotArea {
            left,
            top,
            right,
            baseline,
        },
        bars,
        connectors,
        labels,
        label_line_count,
    })
}
