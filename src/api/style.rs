use serde::{Deserialize, Serialize};

use crate::core::{BarPalette, FontSpec, TransformOptions};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::DisplayUnit;

/// Neutral grey used when a configured color cannot be parsed.
pub const FALLBACK_COLOR: Color = Color::rgb(0.6, 0.6, 0.6);

/// User-facing style settings of the waterfall visual.
///
/// Colors stay as hex strings so a settings bundle can be persisted as-is;
/// they are resolved through [`resolve_color`] when a frame is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterfallStyle {
    pub default_color: String,
    pub positive_bar_color: String,
    pub negative_bar_color: String,
    pub total_bar_color: String,
    pub font_size: f64,
    pub font_family: String,
    pub font_color: String,
    /// Stroke width of the category axis line.
    pub line_width: f64,
    pub line_color: String,
    pub bar_width: f64,
    pub connector_width: f64,
    /// Horizontal gap between connector ends and the bars they join.
    pub connector_inset: f64,
    pub gradient_enabled: bool,
    pub data_label: bool,
    pub data_font_size: f64,
    pub data_font_family: String,
    pub data_font_color: String,
    pub gridline_color: String,
    pub gridline_width: f64,
    pub show_axis: bool,
    /// Hides the opening bar so the chart starts at the first subtotal.
    pub hide_start: bool,
    pub show_grand_total: bool,
    pub grand_total_label: String,
    pub decimals: u8,
    pub display_unit: DisplayUnit,
}

impl Default for WaterfallStyle {
    fn default() -> Self {
        Self {
            default_color: "#999999".to_owned(),
            positive_bar_color: "#00782E".to_owned(),
            negative_bar_color: "#B10606".to_owned(),
            total_bar_color: "#003339".to_owned(),
            font_size: 10.0,
            font_family: "Arial, sans-serif".to_owned(),
            font_color: "#D5D2D2".to_owned(),
            line_width: 1.0,
            line_color: "#D5D2D2".to_owned(),
            bar_width: 40.0,
            connector_width: 1.0,
            connector_inset: 0.0,
            gradient_enabled: false,
            data_label: false,
            data_font_size: 12.0,
            data_font_family: "Arial, sans-serif".to_owned(),
            data_font_color: "#433F72".to_owned(),
            gridline_color: "#333333".to_owned(),
            gridline_width: 0.5,
            show_axis: true,
            hide_start: false,
            show_grand_total: false,
            grand_total_label: "Total".to_owned(),
            decimals: 2,
            display_unit: DisplayUnit::None,
        }
    }
}

/// Parses `hex`, falling back to `fallback` when it is not a valid color.
#[must_use]
pub fn resolve_color(hex: &str, fallback: Color) -> Color {
    Color::from_hex(hex).unwrap_or(fallback)
}

impl WaterfallStyle {
    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("font size", self.font_size),
            ("data font size", self.data_font_size),
            ("bar width", self.bar_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("line width", self.line_width),
            ("connector width", self.connector_width),
            ("connector inset", self.connector_inset),
            ("gridline width", self.gridline_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if self.decimals > 12 {
            return Err(ChartError::InvalidData(
                "decimals must be <= 12".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_hide_start(mut self, hide_start: bool) -> Self {
        self.hide_start = hide_start;
        self
    }

    #[must_use]
    pub fn with_grand_total(mut self, label: impl Into<String>) -> Self {
        self.show_grand_total = true;
        self.grand_total_label = label.into();
        self
    }

    #[must_use]
    pub fn with_data_labels(mut self, enabled: bool) -> Self {
        self.data_label = enabled;
        self
    }

    #[must_use]
    pub fn with_bar_width(mut self, bar_width: f64) -> Self {
        self.bar_width = bar_width;
        self
    }

    #[must_use]
    pub fn with_font(mut self, family: impl Into<String>, size: f64) -> Self {
        self.font_family = family.into();
        self.font_size = size;
        self
    }

    #[must_use]
    pub fn with_display_unit(mut self, display_unit: DisplayUnit, decimals: u8) -> Self {
        self.display_unit = display_unit;
        self.decimals = decimals;
        self
    }

    #[must_use]
    pub fn fallback_color(&self) -> Color {
        resolve_color(&self.default_color, FALLBACK_COLOR)
    }

    #[must_use]
    pub fn palette(&self) -> BarPalette {
        let fallback = self.fallback_color();
        BarPalette {
            positive: resolve_color(&self.positive_bar_color, fallback),
            negative: resolve_color(&self.negative_bar_color, fallback),
            total: resolve_color(&self.total_bar_color, fallback),
            fallback,
            gradient_enabled: self.gradient_enabled,
        }
    }

    #[must_use]
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            hide_first_increment: self.hide_start,
            include_grand_total: self.show_grand_total,
            grand_total_label: self.grand_total_label.clone(),
        }
    }

    #[must_use]
    pub fn label_font(&self) -> FontSpec {
        FontSpec::new(self.font_family.clone(), self.font_size)
    }

    #[must_use]
    pub fn data_label_font(&self) -> FontSpec {
        FontSpec::new(self.data_font_family.clone(), self.data_font_size)
    }
}
