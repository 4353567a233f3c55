use approx::assert_relative_eq;
use waterfall_rs::api::{
    CATEGORY_LABEL_PADDING_PX, DisplayUnit, FormatContext, WaterfallStyle,
};
use waterfall_rs::core::{CategoricalView, FontSpec, PointKind, Viewport};
use waterfall_rs::render::{NullRenderer, TextHAlign};
use waterfall_rs::{ChartError, WaterfallConfig, WaterfallEngine};

fn half_em(text: &str, font: &FontSpec) -> f64 {
    text.chars().count() as f64 * font.size_px * 0.5
}

fn quarterly_view() -> CategoricalView {
    CategoricalView::new(["Q1", "Q2", "Q3"]).with_column("FY", [100.0, -30.0, 50.0])
}

fn engine(width: u32, height: u32) -> WaterfallEngine<NullRenderer> {
    let config = WaterfallConfig::new(Viewport::new(width, height));
    let mut engine = WaterfallEngine::new(NullRenderer::default(), config).expect("engine init");
    engine
        .set_text_measurer(Box::new(half_em))
        .expect("set measurer");
    engine
}

#[test]
fn quarterly_update_cycle_produces_consistent_geometry() {
    let mut engine = engine(800, 400);
    engine.set_input(Some(quarterly_view())).expect("set input");

    let layout = engine.layout();
    assert_eq!(layout.axis.step_size, 20.0);
    assert_eq!(layout.axis.domain_min, -40.0);
    assert_eq!(layout.axis.domain_max, 120.0);
    assert_eq!(layout.bars.len(), 4);
    assert_eq!(layout.connectors.len(), 3);

    let subtotal = &layout.bars[3];
    assert_eq!(subtotal.kind, PointKind::Subtotal);
    assert_relative_eq!(subtotal.y_top, layout.bars[2].terminal_y(), epsilon = 1e-9);
    assert_relative_eq!(
        subtotal.y_bottom(),
        layout.context.zero_pixel(),
        epsilon = 1e-9
    );

    let area = layout.plot_area;
    assert_eq!(area.right, 795.0);
    assert_eq!(area.top, 10.0);
    assert_relative_eq!(area.baseline, 400.0 - (12.0 + 2.0 * CATEGORY_LABEL_PADDING_PX));
    for tick in &layout.axis.ticks {
        assert!(tick.pixel > area.top && tick.pixel < area.baseline);
    }
}

#[test]
fn domain_ends_get_no_gridline() {
    let mut engine = engine(800, 400);
    engine.set_input(Some(quarterly_view())).expect("set input");

    let layout = engine.layout();
    let values: Vec<f64> = layout.axis.ticks.iter().map(|tick| tick.value).collect();
    // 120 maps onto the plot top and -40 onto the baseline.
    assert_eq!(values, vec![-20.0, 0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
}

#[test]
fn render_hands_a_complete_frame_to_the_renderer() {
    let mut engine = engine(800, 400);
    engine.set_input(Some(quarterly_view())).expect("set input");
    engine.render().expect("render");

    let ticks = engine.layout().axis.ticks.len();
    let renderer = engine.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_rect_count, 4);
    // Gridlines, the category axis line and three connectors.
    assert_eq!(renderer.last_line_count, ticks + 1 + 3);
    // Tick labels plus one line per category label.
    assert_eq!(renderer.last_text_count, ticks + 4);
}

#[test]
fn missing_binding_renders_only_the_axis_line() {
    let mut engine = engine(640, 360);
    engine.set_input(None).expect("set input");
    let frame = engine.build_render_frame().expect("frame");

    assert!(engine.dataset().is_empty());
    assert!(frame.rects.is_empty());
    assert!(frame.texts.is_empty());
    assert_eq!(frame.lines.len(), 1);
}

#[test]
fn unusable_cells_never_fail_the_update() {
    let view = CategoricalView::new(["a", "b"]).with_column("g", ["oops", "n/a"]);
    let mut engine = engine(640, 360);
    engine.set_input(Some(view)).expect("set input");

    // Only the group subtotal of zero survives.
    assert_eq!(engine.dataset().len(), 1);
    assert_eq!(engine.layout().bars[0].height, 0.0);
    engine.render().expect("render");
}

#[test]
fn wrapped_labels_push_the_baseline_up() {
    let short = CategoricalView::new(["A", "B", "C"]).with_column("Net", [10.0, -4.0, 6.0]);
    let long = CategoricalView::new(["Revenue", "Cost of goods sold", "Other income"])
        .with_column("Net", [10.0, -4.0, 6.0]);

    let mut engine = engine(260, 300);
    engine.set_input(Some(short)).expect("short input");
    let short_baseline = engine.layout().plot_area.baseline;

    engine.set_input(Some(long)).expect("long input");
    let layout = engine.layout();
    assert!(layout.label_line_count >= 2);
    assert!(layout.plot_area.baseline < short_baseline);
    assert_relative_eq!(
        layout.plot_area.baseline,
        300.0 - (layout.label_line_count as f64 * 12.0 + 2.0 * CATEGORY_LABEL_PADDING_PX),
        epsilon = 1e-9
    );
}

#[test]
fn axis_labels_reserve_left_margin() {
    let mut engine = engine(800, 400);
    engine.set_input(Some(quarterly_view())).expect("set input");
    let plain_left = engine.layout().plot_area.left;

    let style = WaterfallStyle::default().with_display_unit(DisplayUnit::None, 6);
    engine.set_style(style).expect("set style");
    assert!(engine.layout().plot_area.left > plain_left);

    let mut hidden = engine.config().style.clone();
    hidden.show_axis = false;
    engine.set_style(hidden).expect("set style");
    assert_eq!(engine.layout().plot_area.left, 0.0);
}

#[test]
fn hide_start_and_grand_total_follow_the_style() {
    let view = CategoricalView::new(["Opening", "Sales", "Costs"])
        .with_column("FY", [100.0, 50.0, -30.0]);
    let mut engine = engine(800, 400);
    engine.set_input(Some(view)).expect("set input");
    assert_eq!(engine.dataset().len(), 4);

    let style = WaterfallStyle::default()
        .with_hide_start(true)
        .with_grand_total("Total");
    engine.set_style(style).expect("set style");

    let categories: Vec<&str> = engine.dataset().categories().collect();
    assert_eq!(categories, vec!["Sales", "Costs", "FY", "Total"]);
    let bars = &engine.layout().bars;
    assert_relative_eq!(
        bars[0].baseline_y(),
        engine
            .layout()
            .context
            .value_scale
            .value_to_pixel(100.0)
            .expect("px"),
        epsilon = 1e-9
    );
}

#[test]
fn data_labels_use_the_value_formatter() {
    let mut engine = engine(800, 400);
    engine
        .set_value_formatter(Box::new(|value: f64, _: &FormatContext<'_>| {
            format!("<{value}>")
        }))
        .expect("set formatter");
    engine
        .set_style(WaterfallStyle::default().with_data_labels(true))
        .expect("set style");
    engine.set_input(Some(quarterly_view())).expect("set input");

    let frame = engine.build_render_frame().expect("frame");
    let data_labels: Vec<&str> = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Center && text.text.starts_with('<'))
        .map(|text| text.text.as_str())
        .collect();
    assert_eq!(data_labels, vec!["<100>", "<-30>", "<50>", "<120>"]);
    // Room for data labels moves the plot top down.
    assert!(engine.layout().plot_area.top > 10.0);
}

#[test]
fn invalid_viewport_and_style_are_rejected() {
    let config = WaterfallConfig::new(Viewport::new(0, 400));
    match WaterfallEngine::new(NullRenderer::default(), config) {
        Err(ChartError::InvalidViewport { width, height }) => {
            assert_eq!((width, height), (0, 400));
        }
        other => panic!("expected invalid viewport, got {:?}", other.err()),
    }

    let mut engine = engine(800, 400);
    assert!(engine.set_viewport(Viewport::new(800, 0)).is_err());
    assert_eq!(engine.viewport(), Viewport::new(800, 400));

    let style = WaterfallStyle::default().with_bar_width(-1.0);
    assert!(engine.set_style(style).is_err());
    assert_eq!(engine.config().style.bar_width, 40.0);
}

#[test]
fn resizing_relays_out_the_same_data() {
    let mut engine = engine(800, 400);
    engine.set_input(Some(quarterly_view())).expect("set input");
    let wide = engine.layout().bars[0].x_center;

    engine
        .set_viewport(Viewport::new(400, 400))
        .expect("resize");
    assert!(engine.layout().bars[0].x_center < wide);
    assert_eq!(engine.dataset().len(), 4);
}
