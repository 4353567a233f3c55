use tracing::{debug, warn};

use crate::core::{
    CategoricalView, ChartDataset, EstimatedTextMeasurer, TextMeasurer, Viewport, transform,
};
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

use super::render_frame_builder::build_render_frame;
use super::{
    DisplayUnitFormatter, ValueFormatter, WaterfallConfig, WaterfallLayout, WaterfallSnapshot,
    WaterfallStyle, compute_layout,
};

/// Orchestrates one waterfall visual: holds the latest input and settings and
/// rebuilds every derived value on each update.
///
/// Nothing is patched incrementally; an update replaces dataset, axis plan and
/// geometry wholesale. `&mut self` on every update keeps two passes from ever
/// overlapping.
pub struct WaterfallEngine<R: Renderer> {
    renderer: R,
    config: WaterfallConfig,
    measurer: Box<dyn TextMeasurer>,
    formatter: Box<dyn ValueFormatter>,
    input: Option<CategoricalView>,
    layout: WaterfallLayout,
}

impl<R: Renderer> WaterfallEngine<R> {
    pub fn new(renderer: R, config: WaterfallConfig) -> ChartResult<Self> {
        config.validate()?;
        let measurer: Box<dyn TextMeasurer> = Box::new(EstimatedTextMeasurer);
        let formatter: Box<dyn ValueFormatter> = Box::new(DisplayUnitFormatter);
        let layout = compute_layout(
            ChartDataset::empty(),
            &config,
            measurer.as_ref(),
            formatter.as_ref(),
        )?;

        Ok(Self {
            renderer,
            config,
            measurer,
            formatter,
            input: None,
            layout,
        })
    }

    /// Replaces the text measurer and relays out.
    pub fn set_text_measurer(&mut self, measurer: Box<dyn TextMeasurer>) -> ChartResult<()> {
        self.measurer = measurer;
        self.relayout()
    }

    /// Replaces the number formatter and relays out.
    pub fn set_value_formatter(&mut self, formatter: Box<dyn ValueFormatter>) -> ChartResult<()> {
        self.formatter = formatter;
        self.relayout()
    }

    /// Starts an update cycle with a new data snapshot.
    ///
    /// `None` means the host has no categorical binding yet; the chart goes
    /// blank instead of failing.
    pub fn set_input(&mut self, input: Option<CategoricalView>) -> ChartResult<()> {
        self.input = input;
        self.relayout()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        let mut config = self.config.clone();
        config.viewport = viewport;
        config.validate()?;
        self.config = config;
        self.relayout()
    }

    pub fn set_style(&mut self, style: WaterfallStyle) -> ChartResult<()> {
        style.validate()?;
        self.config.style = style;
        self.relayout()
    }

    #[must_use]
    pub fn config(&self) -> &WaterfallConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn layout(&self) -> &WaterfallLayout {
        &self.layout
    }

    #[must_use]
    pub fn dataset(&self) -> &ChartDataset {
        &self.layout.dataset
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        build_render_frame(
            &self.layout,
            &self.config.style,
            self.config.viewport,
            self.formatter.as_ref(),
        )
    }

    /// Builds the current frame and hands it to the renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        if let Err(err) = self.renderer.render(&frame) {
            warn!(error = %err, "renderer rejected waterfall frame");
            return Err(err);
        }
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> WaterfallSnapshot {
        WaterfallSnapshot {
            viewport: self.config.viewport,
            dataset: self.layout.dataset.clone(),
            axis: self.layout.axis.clone(),
            plot_area: self.layout.plot_area,
            bars: self.layout.bars.clone(),
            connectors: self.layout.connectors.clone(),
            labels: self.layout.labels.clone(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }

    fn relayout(&mut self) -> ChartResult<()> {
        let style = &self.config.style;
        let dataset = transform(
            self.input.as_ref(),
            &style.transform_options(),
            &style.palette(),
        );

        let layout = match compute_layout(
            dataset,
            &self.config,
            self.measurer.as_ref(),
            self.formatter.as_ref(),
        ) {
            Ok(layout) => layout,
            Err(err) => {
                warn!(error = %err, "layout failed, falling back to empty dataset");
                compute_layout(
                    ChartDataset::empty(),
                    &self.config,
                    self.measurer.as_ref(),
                    self.formatter.as_ref(),
                )?
            }
        };

        debug!(
            items = layout.bars.len(),
            connectors = layout.connectors.len(),
            "waterfall update cycle complete"
        );
        self.layout = layout;
        Ok(())
    }
}
