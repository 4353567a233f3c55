use serde::{Deserialize, Serialize};

use crate::core::{StepPlanTuning, Viewport};
use crate::error::{ChartError, ChartResult};

use super::WaterfallStyle;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub style: WaterfallStyle,
    #[serde(default)]
    pub axis_tuning: StepPlanTuning,
}

impl WaterfallConfig {
    /// Creates a config with default style and axis tuning.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            style: WaterfallStyle::default(),
            axis_tuning: StepPlanTuning::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: WaterfallStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_axis_tuning(mut self, tuning: StepPlanTuning) -> Self {
        self.axis_tuning = tuning;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.style.validate()?;
        self.axis_tuning.validate()?;
        Ok(())
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse waterfall config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Serialization(format!("waterfall config: {e}")))
    }
}
