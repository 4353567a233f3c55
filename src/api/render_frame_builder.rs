use crate::core::{BarDirection, Viewport};
use crate::error::ChartResult;
use crate::render::{LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::{
    AXIS_LABEL_GAP_PX, CATEGORY_LABEL_PADDING_PX, DATA_LABEL_GAP_PX, ValueFormatter,
    WaterfallLayout, WaterfallStyle, format_context, resolve_color,
};

/// Share of the font size used to drop a text baseline onto a pixel row.
const TEXT_CENTER_OFFSET_RATIO: f64 = 0.35;

/// Materializes `layout` into draw primitives.
///
/// Draw order: gridlines, tick labels, category axis, bars, connectors,
/// category labels, data labels. An empty dataset only gets the category
/// axis line.
pub fn build_render_frame<F>(
    layout: &WaterfallLayout,
    style: &WaterfallStyle,
    viewport: Viewport,
    formatter: &F,
) -> ChartResult<RenderFrame>
where
    F: ValueFormatter + ?Sized,
{
    let mut frame = RenderFrame::new(viewport);
    let fallback = style.fallback_color();
    let font_color = resolve_color(&style.font_color, fallback);
    let line_color = resolve_color(&style.line_color, fallback);
    let area = layout.plot_area;

    if style.show_axis && !layout.dataset.is_empty() {
        let ctx = format_context(style, &layout.dataset, &layout.axis);
        let gridline_color = resolve_color(&style.gridline_color, fallback);
        for tick in &layout.axis.ticks {
            if style.gridline_width > 0.0 {
                frame = frame.with_line(LinePrimitive::new(
                    area.left,
                    tick.pixel,
                    area.right,
                    tick.pixel,
                    style.gridline_width,
                    gridline_color,
                ));
            }
            let text = formatter.format(tick.value, &ctx);
            if !text.is_empty() {
                frame = frame.with_text(TextPrimitive::new(
                    text,
                    area.left - AXIS_LABEL_GAP_PX * 0.5,
                    tick.pixel + style.font_size * TEXT_CENTER_OFFSET_RATIO,
                    style.font_size,
                    font_color,
                    TextHAlign::Right,
                ));
            }
        }
    }

    if style.line_width > 0.0 {
        frame = frame.with_line(LinePrimitive::new(
            0.0,
            area.baseline,
            area.right,
            area.baseline,
            style.line_width,
            line_color,
        ));
    }

    for bar in &layout.bars {
        frame = frame.with_rect(RectPrimitive::new(
            bar.x_left, bar.y_top, bar.width, bar.height, bar.color,
        ));
    }

    if style.connector_width > 0.0 {
        for connector in &layout.connectors {
            frame = frame.with_line(LinePrimitive::new(
                connector.x_start,
                connector.y,
                connector.x_end,
                connector.y,
                style.connector_width,
                line_color,
            ));
        }
    }

    let line_height = style.label_font().line_height_px();
    for (bar, label) in layout.bars.iter().zip(&layout.labels) {
        for (line_index, line) in label.lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            frame = frame.with_text(TextPrimitive::new(
                line.clone(),
                bar.x_center,
                area.baseline
                    + CATEGORY_LABEL_PADDING_PX
                    + style.font_size
                    + line_index as f64 * line_height,
                style.font_size,
                font_color,
                TextHAlign::Center,
            ));
        }
    }

    if style.data_label {
        let ctx = format_context(style, &layout.dataset, &layout.axis);
        let data_color = resolve_color(&style.data_font_color, fallback);
        for (bar, item) in layout.bars.iter().zip(&layout.dataset.items) {
            let text = formatter.format(item.value, &ctx);
            if text.is_empty() {
                continue;
            }
            let y = match bar.direction {
                BarDirection::Up => bar.y_top - DATA_LABEL_GAP_PX,
                BarDirection::Down => bar.y_bottom() + DATA_LABEL_GAP_PX + style.data_font_size,
            };
            frame = frame.with_text(TextPrimitive::new(
                text,
                bar.x_center,
                y,
                style.data_font_size,
                data_color,
                TextHAlign::Center,
            ));
        }
    }

    frame.validate()?;
    Ok(frame)
}
