use serde::{Deserialize, Serialize};

use crate::core::{AxisPlan, BarGeometry, ChartDataset, Connector, Viewport, WrappedLabel};
use crate::error::{ChartError, ChartResult};

use super::PlotArea;

pub const WATERFALL_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallSnapshot {
    pub viewport: Viewport,
    pub dataset: ChartDataset,
    pub axis: AxisPlan,
    pub plot_area: PlotArea,
    pub bars: Vec<BarGeometry>,
    pub connectors: Vec<Connector>,
    pub labels: Vec<WrappedLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: WaterfallSnapshot,
}

impl WaterfallSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = WaterfallSnapshotJsonContractV1 {
            schema_version: WATERFALL_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::Serialization(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<WaterfallSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: WaterfallSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != WATERFALL_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
