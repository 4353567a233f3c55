//! waterfall-rs: layout engine for waterfall charts.
//!
//! The crate turns categorical input into pixel-exact waterfall geometry:
//! cumulative bar placement, a "nice" value axis, connectors between bars and
//! wrapped category labels. Drawing is left to a [`render::Renderer`]
//! implementation supplied by the host.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{WaterfallConfig, WaterfallEngine};
pub use error::{ChartError, ChartResult};
