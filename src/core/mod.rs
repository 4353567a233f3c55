pub mod axis_plan;
pub mod dataset;
pub mod label_wrap;
pub mod layout_context;
pub mod palette;
pub mod point_scale;
pub mod scale;
pub mod text_metrics;
pub mod types;
pub mod waterfall;

pub use axis_plan::{AxisPlan, AxisTick, StepPlanTuning, TickBand, allocate_ticks, nice_step};
pub use dataset::{CategoricalView, CellValue, ChartDataset, TransformOptions, transform};
pub use label_wrap::{WrappedLabel, max_label_lines, wrap_label};
pub use layout_context::LayoutContext;
pub use palette::BarPalette;
pub use point_scale::PointScale;
pub use scale::LinearScale;
pub use text_metrics::{CachedTextMeasurer, EstimatedTextMeasurer, FontSpec, TextMeasurer};
pub use types::{BarDirection, DataPoint, PointKind, Viewport};
pub use waterfall::{BarGeometry, Connector, layout_bars, route_connectors};
