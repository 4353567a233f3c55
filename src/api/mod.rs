mod engine;
mod engine_config;
mod engine_snapshot;
mod layout_pass;
mod render_frame_builder;
mod style;
mod value_format;

pub use engine::WaterfallEngine;
pub use engine_config::WaterfallConfig;
pub use engine_snapshot::{
    WATERFALL_SNAPSHOT_JSON_SCHEMA_V1, WaterfallSnapshot, WaterfallSnapshotJsonContractV1,
};
pub use layout_pass::{
    AXIS_LABEL_GAP_PX, CATEGORY_LABEL_PADDING_PX, DATA_LABEL_GAP_PX, PlotArea, WaterfallLayout,
    compute_layout, format_context,
};
pub use render_frame_builder::build_render_frame;
pub use style::{FALLBACK_COLOR, WaterfallStyle, resolve_color};
pub use value_format::{DisplayUnit, DisplayUnitFormatter, FormatContext, ValueFormatter};
